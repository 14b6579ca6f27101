//! Hypothetical buy-and-hold projection from an event's resolved trading day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::error::CoreError;
use crate::index::{align, AlignmentResult, SortedDates};

/// Default principal when the config does not set `metrics.invest_amount_usd`.
pub const DEFAULT_PRINCIPAL: f64 = 1000.0;

/// `principal` dollars bought at the resolved close and held to the latest close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub principal: f64,
    pub resolved_date: NaiveDate,
    pub resolved_price: f64,
    pub shares: f64,
    /// One entry per sorted date; `None` before the position was opened.
    pub value_series: Vec<Option<f64>>,
    pub final_date: NaiveDate,
    pub final_value: f64,
    /// `final_value / principal - 1`.
    pub total_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    Resolved(InvestmentProjection),
    /// No trading day on or after the event date, or the return is not
    /// well-defined. Callers render a neutral placeholder.
    Unresolved,
}

impl Projection {
    pub fn as_resolved(&self) -> Option<&InvestmentProjection> {
        match self {
            Projection::Resolved(p) => Some(p),
            Projection::Unresolved => None,
        }
    }
}

/// Project `principal` invested at the first trading day on/after `event_date`.
pub fn project(
    series: &PriceSeries,
    sorted: &SortedDates,
    event_date: NaiveDate,
    principal: f64,
) -> Result<Projection, CoreError> {
    let alignment = align(series, sorted, event_date);
    project_aligned(series, sorted, &alignment, principal)
}

/// Same as [`project`], reusing an alignment computed by the caller.
pub fn project_aligned(
    series: &PriceSeries,
    sorted: &SortedDates,
    alignment: &AlignmentResult,
    principal: f64,
) -> Result<Projection, CoreError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Ok(Projection::Unresolved);
    }
    let Some(resolved) = alignment.resolved else {
        return Ok(Projection::Unresolved);
    };
    if !resolved.price.is_finite() || resolved.price <= 0.0 {
        return Err(CoreError::InvalidPrice {
            date: resolved.date,
            price: resolved.price,
        });
    }

    let shares = principal / resolved.price;
    let mut value_series = Vec::with_capacity(sorted.len());
    let mut last = None;
    for (i, &date) in sorted.as_slice().iter().enumerate() {
        if i < resolved.index {
            value_series.push(None);
            continue;
        }
        let Some(price) = series.get(date) else {
            value_series.push(None);
            continue;
        };
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::InvalidPrice { date, price });
        }
        let value = shares * price;
        value_series.push(Some(value));
        last = Some((date, value));
    }

    let Some((final_date, final_value)) = last else {
        return Ok(Projection::Unresolved);
    };
    let total_return = final_value / principal - 1.0;
    if !total_return.is_finite() {
        return Ok(Projection::Unresolved);
    }

    Ok(Projection::Resolved(InvestmentProjection {
        principal,
        resolved_date: resolved.date,
        resolved_price: resolved.price,
        shares,
        value_series,
        final_date,
        final_value,
        total_return,
    }))
}
