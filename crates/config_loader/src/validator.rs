//! 配置校验模块
//!
//! 校验规则：
//! - 输入/输出路径非空
//! - 列名非空，且同一输入内唯一
//! - 两个步骤名非空且不同
//! - date_formats 非空，且均为合法的 chrono 格式

use std::collections::HashSet;

use chrono::format::{Item, StrftimeItems};
use contracts::{ReportConfig, ReportError};

/// 校验 ReportConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &ReportConfig) -> Result<(), ReportError> {
    validate_paths(config)?;
    validate_columns(config)?;
    validate_steps(config)?;
    validate_date_formats(config)?;
    Ok(())
}

/// 校验路径非空
fn validate_paths(config: &ReportConfig) -> Result<(), ReportError> {
    let paths = [
        ("inputs.approvals.path", &config.inputs.approvals.path),
        ("inputs.requests.path", &config.inputs.requests.path),
        ("output.path", &config.output.path),
    ];
    for (field, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ReportError::config_validation(field, "path cannot be empty"));
        }
    }
    Ok(())
}

/// 校验列名
fn validate_columns(config: &ReportConfig) -> Result<(), ReportError> {
    let columns = &config.columns;
    let approvals = [
        ("columns.record_name", &columns.record_name),
        ("columns.step_name", &columns.step_name),
        ("columns.step_completed_date", &columns.step_completed_date),
    ];
    let requests = [
        ("columns.reference_number", &columns.reference_number),
        ("columns.program", &columns.program),
    ];

    for group in [&approvals[..], &requests[..]] {
        let mut seen = HashSet::new();
        for (field, name) in group {
            if name.trim().is_empty() {
                return Err(ReportError::config_validation(
                    *field,
                    "column name cannot be empty",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ReportError::config_validation(
                    *field,
                    format!("duplicate column name '{name}'"),
                ));
            }
        }
    }
    Ok(())
}

/// 校验步骤名
fn validate_steps(config: &ReportConfig) -> Result<(), ReportError> {
    let steps = &config.steps;
    if steps.po_approval.is_empty() {
        return Err(ReportError::config_validation(
            "steps.po_approval",
            "step name cannot be empty",
        ));
    }
    if steps.president_approval.is_empty() {
        return Err(ReportError::config_validation(
            "steps.president_approval",
            "step name cannot be empty",
        ));
    }
    if steps.po_approval == steps.president_approval {
        return Err(ReportError::config_validation(
            "steps",
            format!(
                "po_approval and president_approval must be distinct, both are '{}'",
                steps.po_approval
            ),
        ));
    }
    Ok(())
}

/// 校验日期格式
fn validate_date_formats(config: &ReportConfig) -> Result<(), ReportError> {
    let formats = &config.processing.date_formats;
    if formats.is_empty() {
        return Err(ReportError::config_validation(
            "processing.date_formats",
            "at least one date format is required",
        ));
    }
    for (idx, fmt) in formats.iter().enumerate() {
        if fmt.is_empty() || StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::config_validation(
                format!("processing.date_formats[{idx}]"),
                format!("invalid date format '{fmt}'"),
            ));
        }
    }
    Ok(())
}
