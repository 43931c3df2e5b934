use funnel_app::{PeriodParams, Result, resolve_period};
use funnel_core::{AdCountPoint, ChartMarker, FunnelCountPoint, FunnelPctPoint, Period, SpendPoint};

use crate::{AppContext, ChartRequest, OkResponse, WorkbookResponse};

fn chart_period(req: &ChartRequest) -> Result<(Period, bool)> {
    resolve_period(&PeriodParams {
        period: req.period.clone(),
        show_sundays: req.show_sundays,
    })
}

pub fn user_funnel(ctx: &AppContext, req: ChartRequest) -> Result<Vec<FunnelPctPoint>> {
    let (period, _) = chart_period(&req)?;
    ctx.app_state.services.analytics.user_funnel(period)
}

pub fn funnel_counts(ctx: &AppContext, req: ChartRequest) -> Result<Vec<FunnelCountPoint>> {
    let (period, _) = chart_period(&req)?;
    ctx.app_state.services.analytics.funnel_counts(period)
}

pub fn spend_series(ctx: &AppContext, req: ChartRequest) -> Result<Vec<SpendPoint>> {
    let (period, _) = chart_period(&req)?;
    ctx.app_state.services.analytics.spend_series(period)
}

pub fn ad_counts(ctx: &AppContext, req: ChartRequest) -> Result<Vec<AdCountPoint>> {
    let (period, _) = chart_period(&req)?;
    ctx.app_state.services.analytics.ad_counts(period)
}

pub fn markers(ctx: &AppContext, req: ChartRequest) -> Result<Vec<ChartMarker>> {
    let (period, show_sundays) = chart_period(&req)?;
    ctx.app_state.services.analytics.markers(period, show_sundays)
}

pub fn reload(ctx: &AppContext) -> Result<OkResponse> {
    ctx.app_state.services.reload();
    Ok(OkResponse { ok: true })
}

pub fn workbook_info(ctx: &AppContext) -> Result<WorkbookResponse> {
    Ok(WorkbookResponse {
        workbook: ctx.app_state.config.workbook.clone(),
        workbook_dir: ctx.app_state.config.workbook_dir.display().to_string(),
        app_data_dir: ctx.app_data_dir.display().to_string(),
    })
}
