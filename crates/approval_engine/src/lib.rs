//! # Approval Engine
//!
//! Approval time computation.
//!
//! 负责：
//! - 按步骤名拆分审批事件 (PO / President)
//! - 按记录名内连接，计算自然日与工作日
//! - 左连接项目信息
//! - 按 (年份, 项目) 分组求均值
//!
//! ## 使用示例
//!
//! ```ignore
//! use approval_engine::ApprovalEngine;
//!
//! let engine = ApprovalEngine::new(config.steps.clone(), config.processing.clone());
//! let output = engine.run(&inputs.approvals, &inputs.requests)?;
//! for row in &output.report.rows {
//!     println!("{} {:?} {:?}", row.year, row.program, row.avg_days);
//! }
//! ```

mod aggregate;
mod business_days;
mod engine;
mod join;
mod reshape;

pub use aggregate::aggregate;
pub use business_days::{count_business_days, days_between};
pub use engine::{ApprovalEngine, EngineOutput, EngineStats};
pub use join::{enrich, measure, pair_approvals, EnrichOutcome, JoinOutcome};
pub use reshape::{split_steps, StepSplit};

// Re-export contracts types
pub use contracts::{AggregateRow, ApprovalPair, EnrichedPair, Report};
