pub mod stage1_filter;
pub mod stage2_extract;
pub mod stage3_aggregate;
pub mod stage4_report;
