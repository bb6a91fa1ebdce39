//! One builder per report sheet. Each takes projects as stored and runs them
//! through the metrics engine; nothing is read from cached values.

use estateflow_core::{Project, ViewMode};
use estateflow_metrics::{
    aggregate_channels, calculate_metrics, distribute_weeks, portfolio_analytics,
    reconcile_budget, reconcile_period, weekly_performance, weekly_totals, ReportingWindow,
};

use crate::sheet::{amount, count, percent, rounded, Sheet};

/// Lifetime summary of every project, one row each.
///
/// Planned budget is always all-in; spends follow `mode`.
#[must_use]
pub fn master_report(projects: &[Project], mode: ViewMode) -> Sheet {
    let mut sheet = Sheet::new(
        "Master Report",
        "EstateFlow_Master_Report",
        vec![
            "Project Name",
            "SPOC",
            "Planned Budget (All-in)",
            "Received Budget",
            "Performance Spends",
            "Other Spends",
            "Total Consumed",
            "Pending Budget",
            "Target Leads",
            "Achieved Leads",
            "Leads Delivery %",
            "Target AD",
            "Achieved AD",
            "AD Delivery %",
            "Target CPL",
            "Achieved CPL",
            "Achieved CPW",
            "Digital Bookings",
            "Presales Bookings",
            "Total Units",
            "Digital BV (Cr)",
            "Presales BV (Cr)",
        ],
    );

    for p in projects {
        let tax_multiplier = mode.tax_multiplier(p.plan.tax_percent);
        let weeks = distribute_weeks(&p.weeks, &calculate_metrics(&p.plan));
        let totals = weekly_totals(&weeks);
        let period = reconcile_period(
            &weeks,
            &p.actuals,
            &p.plan,
            ReportingWindow::full(),
            tax_multiplier,
        );
        let budget = reconcile_budget(p.plan.received_budget, period.actual_spend, p.other_spends);

        sheet.push(vec![
            p.name.clone(),
            p.poc.clone(),
            amount(totals.spends_all_in),
            amount(budget.received_budget),
            amount(budget.performance_spend),
            amount(budget.other_spends),
            amount(budget.total_spend),
            amount(budget.pending),
            rounded(period.leads.target),
            count(period.leads.achieved),
            percent(period.leads.delivery_percent),
            rounded(period.ad.target),
            count(period.ad.achieved),
            percent(period.ad.delivery_percent),
            amount(p.plan.cpl),
            amount(period.ach_cpl),
            amount(period.ach_cpw),
            count(period.digital_bookings),
            count(period.presales_bookings),
            count(period.total_bookings),
            amount(period.achieved_digital_bv),
            amount(period.achieved_presales_bv),
        ]);
    }

    sheet
}

/// Plan inputs followed by the headline derived targets.
#[must_use]
pub fn business_plan(project: &Project) -> Sheet {
    let plan = &project.plan;
    let m = calculate_metrics(plan);
    let mut sheet = Sheet::new(
        "Business Plan",
        format!("{}_Business_Plan", project.name),
        vec!["Metric", "Value"],
    );

    let rows: [(&str, String); 14] = [
        ("Overall BV Target (Cr)", count(plan.overall_bv)),
        ("ATS (Cr)", count(plan.ats)),
        ("Digital Contribution %", count(plan.digital_contribution_percent)),
        ("Presales Contribution %", count(plan.presales_contribution_percent)),
        ("Lead to Walkin (LTW) %", count(plan.ltw_percent)),
        ("Walkin to Booking (WTB) %", count(plan.wtb_percent)),
        ("Planned CPL", count(plan.cpl)),
        ("Tax %", count(plan.tax_percent)),
        ("---", "---".to_string()),
        ("Derived Total Units", amount(m.total_units)),
        ("Target Leads", amount(m.target_leads)),
        ("Target Walkins", amount(m.target_walkins)),
        ("All-in Budget", amount(m.all_in_budget)),
        ("Projected Revenue", amount(m.revenue)),
    ];
    for (metric, value) in rows {
        sheet.push(vec![metric.to_string(), value]);
    }

    sheet
}

/// Stored channel configuration.
#[must_use]
pub fn media_mix(project: &Project) -> Sheet {
    let mut sheet = Sheet::new(
        "Media Mix",
        format!("{}_Media_Mix", project.name),
        vec![
            "Channel Name",
            "Allocation %",
            "Est CPL",
            "CAPI % (Qual)",
            "CAPI to AP %",
            "AP to AD %",
        ],
    );
    for ch in &project.media_plan {
        sheet.push(vec![
            ch.name.clone(),
            count(ch.allocation_percent),
            count(ch.estimated_cpl),
            count(ch.capi_percent),
            count(ch.capi_to_ap_percent),
            count(ch.ap_to_ad_percent),
        ]);
    }
    sheet
}

/// Week-on-week plan with rounded funnel targets.
#[must_use]
pub fn wow_plan(project: &Project, mode: ViewMode) -> Sheet {
    let mut sheet = Sheet::new(
        "WoW Plan",
        format!("{}_WoW_Plan", project.name),
        vec![
            "Week",
            "Dates",
            "Spend Dist %",
            "Lead Dist %",
            "AD Conv %",
            "Target Leads",
            "Target AP",
            "Target AD",
            "Target Spends",
        ],
    );
    for w in distribute_weeks(&project.weeks, &calculate_metrics(&project.plan)) {
        sheet.push(vec![
            w.week_label.clone(),
            w.date_range.clone(),
            count(w.spend_distribution),
            count(w.lead_distribution),
            count(w.ad_conversion),
            rounded(w.leads),
            rounded(w.ap),
            rounded(w.ad),
            amount(w.spends_for(mode)),
        ]);
    }
    sheet
}

/// Target against actual for every week.
#[must_use]
pub fn performance(project: &Project, mode: ViewMode) -> Sheet {
    let tax_multiplier = mode.tax_multiplier(project.plan.tax_percent);
    let weeks = distribute_weeks(&project.weeks, &calculate_metrics(&project.plan));
    let table = weekly_performance(&weeks, &project.actuals, tax_multiplier);

    let mut sheet = Sheet::new(
        "Performance",
        format!("{}_Performance", project.name),
        vec![
            "Week",
            "Dates",
            "Target Leads",
            "Actual Leads",
            "Target AP",
            "Actual AP",
            "Target AD",
            "Actual AD",
            "Target Spends",
            "Actual Spends",
            "Actual Dig Bookings",
            "Actual Presales",
            "Act CPL",
            "Act CPW",
        ],
    );
    for r in &table.rows {
        sheet.push(vec![
            r.week_label.clone(),
            r.date_range.clone(),
            rounded(r.target_leads),
            count(r.actual_leads),
            rounded(r.target_ap),
            count(r.actual_ap),
            rounded(r.target_ad),
            count(r.actual_ad),
            amount(r.target_spend),
            amount(r.actual_spend),
            count(r.digital_bookings),
            count(r.presales_bookings),
            amount(r.ach_cpl),
            amount(r.ach_cpw),
        ]);
    }
    sheet
}

/// Recorded channel funnels with cost per stage.
#[must_use]
pub fn channel_tracker(project: &Project, mode: ViewMode) -> Sheet {
    let tax_multiplier = mode.tax_multiplier(project.plan.tax_percent);
    let report = aggregate_channels(
        &project.media_plan,
        &project.channel_performance,
        tax_multiplier,
    );

    let mut sheet = Sheet::new(
        "Channel Tracker",
        format!("{}_Channel_Tracker", project.name),
        vec![
            "Channel",
            "Spends",
            "Leads",
            "CPL",
            "Open/Attempted",
            "Contacted",
            "Assigned (CAPI)",
            "AP",
            "AD",
            "Bookings",
            "Lost",
            "CP-CAPI",
            "CP-AP",
            "CP-AD",
        ],
    );
    for s in &report.channels {
        let p = &s.performance;
        sheet.push(vec![
            s.name.clone(),
            amount(s.costs.display_spend),
            count(p.leads),
            amount(s.costs.cpl),
            count(p.open_attempted),
            count(p.contacted),
            count(p.assigned_to_sales),
            count(p.ap),
            count(p.ad),
            count(p.bookings),
            count(p.lost),
            amount(s.costs.cp_qualified),
            amount(s.costs.cp_ap),
            amount(s.costs.cp_ad),
        ]);
    }
    sheet
}

/// Portfolio weekly trend. `project_id` of `None` covers every project that
/// is not completed.
#[must_use]
pub fn analytics_data(projects: &[Project], mode: ViewMode, project_id: Option<&str>) -> Sheet {
    let analytics = portfolio_analytics(projects, mode, project_id);
    let mut sheet = Sheet::new(
        "Analytics Data",
        format!("Analytics_Export_{}", project_id.unwrap_or("all")),
        vec![
            "Week",
            "Planned Spend",
            "Actual Spend",
            "Actual Leads",
            "Actual Walkins",
            "Actual Bookings",
            "Calculated CPL",
        ],
    );
    for t in &analytics.trend {
        sheet.push(vec![
            t.week_label.clone(),
            amount(t.planned_spend),
            amount(t.actual_spend),
            count(t.actual_leads),
            count(t.actual_walkins),
            count(t.actual_bookings),
            amount(t.cpl),
        ]);
    }
    if analytics.trend.is_empty() {
        tracing::warn!(
            projects = analytics.project_count,
            "analytics export has no planned or actual spend"
        );
    }
    sheet
}

#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;
