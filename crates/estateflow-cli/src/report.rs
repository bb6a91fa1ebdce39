//! Read-only report handlers. Every table is derived from the stored
//! projects on each run.

use estateflow_core::Project;
use estateflow_metrics::{
    portfolio_analytics, project_view, Delivery, ProjectView, RatioCheck, StageCosts,
};
use estateflow_state::AppState;

use crate::Context;

/// Format a money amount, or `"—"` when it is zero.
fn fmt_cost(value: f64) -> String {
    if value.abs() < f64::EPSILON {
        "\u{2014}".to_string()
    } else {
        format!("{value:.0}")
    }
}

fn fmt_delivery(d: &Delivery) -> String {
    format!(
        "{:.0}/{:.0} ({:.1}%, {})",
        d.achieved, d.target, d.delivery_percent, d.status
    )
}

fn fmt_ratio(r: &RatioCheck) -> String {
    format!(
        "{:.1}% vs {:.1}% plan ({})",
        r.achieved_percent, r.planned_percent, r.status
    )
}

fn find_project<'a>(state: &'a AppState, id: &str) -> anyhow::Result<&'a Project> {
    state
        .project(id)
        .ok_or_else(|| anyhow::anyhow!("project not found: {id}"))
}

fn view_for(ctx: &Context, project_id: &str) -> anyhow::Result<ProjectView> {
    let state = ctx.load_state()?;
    let project = find_project(&state, project_id)?;
    let view = project_view(project, ctx.mode, ctx.window);
    tracing::debug!(
        project = %view.id,
        mode = %view.mode,
        window = %ctx.window,
        "built project view"
    );
    Ok(view)
}

/// List projects with their delivery and budget for the reporting window.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_projects(ctx: &Context, poc: Option<&str>) -> anyhow::Result<()> {
    let state = ctx.load_state()?;
    let views: Vec<ProjectView> = state
        .projects_for_poc(poc)
        .map(|p| project_view(p, ctx.mode, ctx.window))
        .collect();

    if views.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("Reporting window: {} ({} view)", ctx.window, ctx.mode);
    println!();
    println!(
        "{:<6} {:<22} {:<10} {:<10} {:>6} {:>12} {:>8} {:>12} {:>14}",
        "ID", "NAME", "POC", "STATUS", "LOCK", "LEADS %", "AD %", "SPEND", "PENDING"
    );
    println!("{}", "-".repeat(108));
    for v in &views {
        println!(
            "{:<6} {:<22} {:<10} {:<10} {:>6} {:>12.1} {:>8.1} {:>12.0} {:>14.0}",
            v.id,
            v.name,
            v.poc,
            v.status,
            if v.is_locked { "yes" } else { "no" },
            v.period.leads.delivery_percent,
            v.period.ad.delivery_percent,
            v.period.actual_spend,
            v.budget.pending,
        );
    }
    println!();
    println!("{} project(s)", views.len());

    for v in views.iter().filter(|v| v.budget.over_budget) {
        tracing::warn!(
            project = %v.id,
            pending = v.budget.pending,
            "project is over its received budget"
        );
    }
    Ok(())
}

/// List POCs with how many projects each owns.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_pocs(ctx: &Context) -> anyhow::Result<()> {
    let state = ctx.load_state()?;
    if state.pocs.is_empty() {
        println!("No POCs found.");
        return Ok(());
    }
    println!("{:<12} {:<20} {:>8}", "ID", "NAME", "PROJECTS");
    println!("{}", "-".repeat(42));
    for poc in &state.pocs {
        let owned = state.projects_for_poc(Some(poc.name.as_str())).count();
        println!("{:<12} {:<20} {:>8}", poc.id, poc.name, owned);
    }
    Ok(())
}

/// Print the business plan inputs and the derived funnel targets.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the project is unknown.
pub(crate) fn run_plan(ctx: &Context, project_id: &str) -> anyhow::Result<()> {
    let state = ctx.load_state()?;
    let project = find_project(&state, project_id)?;
    let v = project_view(project, ctx.mode, ctx.window);
    let plan = &project.plan;
    let m = &v.metrics;

    println!(
        "{} ({}) \u{2014} {} [{}]{}",
        v.name,
        v.location,
        v.poc,
        v.status,
        if v.is_locked { " locked" } else { "" }
    );
    println!();
    println!("{:<28} {:>16}", "Overall BV (Cr)", plan.overall_bv);
    println!("{:<28} {:>16}", "ATS (Cr)", plan.ats);
    println!("{:<28} {:>16}", "Digital contribution %", plan.digital_contribution_percent);
    println!("{:<28} {:>16}", "Presales contribution %", plan.presales_contribution_percent);
    println!("{:<28} {:>16}", "Lead to walk-in %", plan.ltw_percent);
    println!("{:<28} {:>16}", "Walk-in to booking %", plan.wtb_percent);
    println!("{:<28} {:>16}", "Planned CPL", plan.cpl);
    println!("{:<28} {:>16}", "Tax %", plan.tax_percent);
    println!("{:<28} {:>16.0}", "Received budget", plan.received_budget);
    println!();
    println!("{:<28} {:>16.2}", "Total units", m.total_units);
    println!("{:<28} {:>16.2}", "Digital units", m.digital_units);
    println!("{:<28} {:>16.2}", "Presales units", m.presales_units);
    println!("{:<28} {:>16.2}", "Digital BV (Cr)", m.digital_bv);
    println!("{:<28} {:>16.2}", "Target walk-ins", m.target_walkins);
    println!("{:<28} {:>16.2}", "Target leads", m.target_leads);
    println!("{:<28} {:>16.0}", "Base budget", m.base_budget);
    println!("{:<28} {:>16.0}", "Tax", m.tax_amount);
    println!("{:<28} {:>16.0}", "All-in budget", m.all_in_budget);
    println!("{:<28} {:>16.0}", "CPW", m.cpw);
    println!("{:<28} {:>16.0}", "CPB", m.cpb);
    println!("{:<28} {:>16.2}", "Target COM %", m.target_com);
    println!("{:<28} {:>16.0}", "Target CPW (weekly plan)", v.target_cpw);

    if m.has_unbounded_targets() {
        tracing::warn!(
            project = %v.id,
            "plan has a zero conversion rate; derived targets are not finite"
        );
    }
    Ok(())
}

/// Print the 13-week distribution and its balance check.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the project is unknown.
pub(crate) fn run_wow(ctx: &Context, project_id: &str) -> anyhow::Result<()> {
    let v = view_for(ctx, project_id)?;

    println!(
        "{:<8} {:<16} {:>8} {:>8} {:>8} {:>9} {:>9} {:>8} {:>14}",
        "WEEK", "DATES", "SPEND %", "LEAD %", "AD CONV", "LEADS", "CUM", "AD", "SPENDS"
    );
    println!("{}", "-".repeat(98));
    for w in &v.weeks {
        println!(
            "{:<8} {:<16} {:>8.1} {:>8.1} {:>8.1} {:>9.0} {:>9.0} {:>8.0} {:>14.0}",
            w.week_label,
            w.date_range,
            w.spend_distribution,
            w.lead_distribution,
            w.ad_conversion,
            w.leads,
            w.cumulative_leads,
            w.ad,
            w.spends_for(v.mode),
        );
    }
    let t = &v.weekly_totals;
    let total_spend = match v.mode {
        estateflow_core::ViewMode::Brand => t.spends_base,
        estateflow_core::ViewMode::Agency => t.spends_all_in,
    };
    println!("{}", "-".repeat(98));
    println!(
        "{:<8} {:<16} {:>8.1} {:>8.1} {:>8.1} {:>9.0} {:>9} {:>8.0} {:>14.0}",
        "Total",
        "",
        v.distribution.spend_total,
        v.distribution.lead_total,
        v.distribution.average_ad_conversion,
        t.leads,
        "",
        t.ad,
        total_spend,
    );

    if !v.distribution.spend_balanced {
        tracing::warn!(
            total = v.distribution.spend_total,
            "spend distribution does not sum to 100%"
        );
    }
    if !v.distribution.lead_balanced {
        tracing::warn!(
            total = v.distribution.lead_total,
            "lead distribution does not sum to 100%"
        );
    }
    Ok(())
}

/// Print the media mix forecast against the simulation budget.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the project is unknown.
pub(crate) fn run_media_mix(ctx: &Context, project_id: &str) -> anyhow::Result<()> {
    let v = view_for(ctx, project_id)?;
    let mix = &v.media_mix;

    println!(
        "Simulation budget: {:.0}{}",
        mix.sim_budget,
        if v.manual_override { " (manual)" } else { "" }
    );
    println!();
    println!(
        "{:<20} {:>7} {:>8} {:>14} {:>9} {:>9} {:>8} {:>8}",
        "CHANNEL", "ALLOC %", "EST CPL", "BUDGET", "LEADS", "QUAL", "AP", "AD"
    );
    println!("{}", "-".repeat(90));
    for c in &mix.channels {
        println!(
            "{:<20} {:>7.1} {:>8.0} {:>14.0} {:>9.0} {:>9.0} {:>8.0} {:>8.0}",
            c.name,
            c.allocation_percent,
            c.estimated_cpl,
            c.budget,
            c.leads,
            c.qualified,
            c.ap,
            c.ad,
        );
    }
    println!("{}", "-".repeat(90));
    println!(
        "{:<20} {:>7.1} {:>8.0} {:>14.0} {:>9.0} {:>9.0} {:>8.0} {:>8.0}",
        "Total",
        mix.total_allocation,
        mix.blended_cpl,
        mix.totals.budget,
        mix.totals.leads,
        mix.totals.qualified,
        mix.totals.ap,
        mix.totals.ad,
    );
    println!();
    println!(
        "Walk-ins: {:.0} forecast vs {:.0} target ({:.1}%)",
        mix.totals.ad, mix.target_walkins, mix.walkin_coverage_percent
    );
    if !mix.meets_walkin_target {
        println!("Short by {:.0} walk-ins", mix.walkin_gap());
    }

    if mix.allocation_mismatch {
        tracing::warn!(
            total = mix.total_allocation,
            "channel allocations do not sum to 100%"
        );
    }
    Ok(())
}

/// Print weekly targets against recorded actuals, then the window summary.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the project is unknown.
pub(crate) fn run_performance(ctx: &Context, project_id: &str) -> anyhow::Result<()> {
    let v = view_for(ctx, project_id)?;

    println!(
        "{:<8} {:>8} {:>8} {:>7} {:>7} {:>13} {:>13} {:>9} {:>10} {:>7}",
        "WEEK", "T LEADS", "LEADS", "T AD", "AD", "T SPEND", "SPEND", "CPL", "CPW", "L2W %"
    );
    println!("{}", "-".repeat(100));
    let rows = v.performance.rows.iter().chain([&v.performance.totals]);
    for r in rows {
        let (leads, ad, spend) = if r.reported {
            (
                format!("{:.0}", r.actual_leads),
                format!("{:.0}", r.actual_ad),
                format!("{:.0}", r.actual_spend),
            )
        } else {
            let dash = "\u{2014}".to_string();
            (dash.clone(), dash.clone(), dash)
        };
        println!(
            "{:<8} {:>8.0} {:>8} {:>7.0} {:>7} {:>13.0} {:>13} {:>9} {:>10} {:>7.1}",
            r.week_label,
            r.target_leads,
            leads,
            r.target_ad,
            ad,
            r.target_spend,
            spend,
            fmt_cost(r.ach_cpl),
            fmt_cost(r.ach_cpw),
            r.ach_l2w,
        );
    }

    let p = &v.period;
    let b = &v.budget;
    println!();
    println!("Window: {}", p.window);
    println!("{:<18} {}", "Leads", fmt_delivery(&p.leads));
    println!("{:<18} {}", "AP", fmt_delivery(&p.ap));
    println!("{:<18} {}", "Walk-ins", fmt_delivery(&p.ad));
    println!("{:<18} {}", "Lead to walk-in", fmt_ratio(&p.l2w));
    println!("{:<18} {}", "Walk-in to booking", fmt_ratio(&p.wtb));
    println!(
        "{:<18} {:.0} planned, {:.0} actual",
        "Spend", p.planned_spend, p.actual_spend
    );
    println!(
        "{:<18} CPL {}  CPW {}  CPB {}",
        "Achieved costs",
        fmt_cost(p.ach_cpl),
        fmt_cost(p.ach_cpw),
        fmt_cost(p.ach_cpb)
    );
    println!(
        "{:<18} {:.0} digital, {:.0} presales ({:.1}% of units)",
        "Bookings", p.digital_bookings, p.presales_bookings, v.unit_delivery_percent
    );
    println!(
        "{:<18} {:.2} Cr digital, {:.2} Cr presales",
        "Booked value", p.achieved_digital_bv, p.achieved_presales_bv
    );
    println!();
    println!(
        "Budget: {:.0} received, {:.0} performance, {:.0} other, {:.0} pending",
        b.received_budget, b.performance_spend, b.other_spends, b.pending
    );
    println!("Spend progress: {:.1}%", v.spend_progress_percent);

    if b.over_budget {
        tracing::warn!(
            project = %v.id,
            pending = b.pending,
            "spend exceeds the received budget"
        );
    }
    Ok(())
}

/// Print recorded channel funnels with cost per stage.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the project is unknown.
pub(crate) fn run_channels(ctx: &Context, project_id: &str) -> anyhow::Result<()> {
    let v = view_for(ctx, project_id)?;
    let report = &v.channels;

    let header = || {
        println!(
            "{:<20} {:>12} {:>7} {:>7} {:>6} {:>6} {:>9} {:>9} {:>9} {:>9}",
            "CHANNEL", "SPEND", "LEADS", "CAPI", "AP", "AD", "CPL", "CP-CAPI", "CP-AP", "CP-AD"
        );
        println!("{}", "-".repeat(104));
    };
    let line = |name: &str, p: &estateflow_core::ChannelPerformance, c: &StageCosts| {
        println!(
            "{:<20} {:>12.0} {:>7.0} {:>7.0} {:>6.0} {:>6.0} {:>9} {:>9} {:>9} {:>9}",
            name,
            c.display_spend,
            p.leads,
            p.assigned_to_sales,
            p.ap,
            p.ad,
            fmt_cost(c.cpl),
            fmt_cost(c.cp_qualified),
            fmt_cost(c.cp_ap),
            fmt_cost(c.cp_ad),
        );
    };

    header();
    for s in &report.channels {
        let name = if s.recorded {
            s.name.clone()
        } else {
            format!("{} *", s.name)
        };
        line(&name, &s.performance, &s.costs);
    }
    println!("{}", "-".repeat(104));
    line("Total", &report.totals, &report.total_costs);
    println!();
    println!(
        "Of leads: {:.1}% contacted, {:.1}% assigned, {:.1}% AP, {:.1}% AD, {:.1}% booked",
        report.total_rates.contacted,
        report.total_rates.assigned_to_sales,
        report.total_rates.ap,
        report.total_rates.ad,
        report.total_rates.bookings,
    );
    if report.channels.iter().any(|s| !s.recorded) {
        println!("* no performance recorded yet");
    }
    Ok(())
}

/// Print portfolio analytics and the weekly trend.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_analytics(ctx: &Context, project_id: Option<&str>) -> anyhow::Result<()> {
    let state = ctx.load_state()?;
    if let Some(id) = project_id {
        find_project(&state, id)?;
    }
    let a = portfolio_analytics(&state.projects, ctx.mode, project_id);

    println!("Projects:        {}", a.project_count);
    println!(
        "Spend:           {:.0} of {:.0} planned ({:.1}%)",
        a.actual_spend, a.planned_budget, a.spend_vs_plan_percent
    );
    println!(
        "Leads:           {:.0} of {:.0}",
        a.actual_leads, a.target_leads
    );
    println!(
        "Walk-ins:        {:.0} of {:.0}",
        a.actual_walkins, a.target_walkins
    );
    println!("Bookings:        {:.0}", a.actual_bookings);

    if a.trend.is_empty() {
        println!();
        println!("No weeks with planned or actual spend.");
        return Ok(());
    }

    println!();
    println!(
        "{:<8} {:>14} {:>14} {:>8} {:>8} {:>9} {:>9}",
        "WEEK", "PLANNED", "ACTUAL", "LEADS", "AD", "BOOKINGS", "CPL"
    );
    println!("{}", "-".repeat(76));
    for t in &a.trend {
        println!(
            "{:<8} {:>14.0} {:>14.0} {:>8.0} {:>8.0} {:>9.0} {:>9}",
            t.week_label,
            t.planned_spend,
            t.actual_spend,
            t.actual_leads,
            t.actual_walkins,
            t.actual_bookings,
            fmt_cost(t.cpl),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cost_prints_dash() {
        assert_eq!(fmt_cost(0.0), "\u{2014}");
        assert_eq!(fmt_cost(1234.4), "1234");
    }

    #[test]
    fn delivery_shows_status() {
        let d = Delivery::new(100.0, 95.0);
        assert_eq!(fmt_delivery(&d), "95/100 (95.0%, good)");
    }
}
