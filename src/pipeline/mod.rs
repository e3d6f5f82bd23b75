pub mod stage1_counts;
pub mod stage2_filter;
pub mod stage3_sweep;
pub mod stage4_select;
pub mod stage5_report;
