//! Derived funnel metrics for a real-estate campaign portfolio.
//!
//! Every function here is pure: projects go in, freshly computed value
//! structures come out. Numeric edge cases resolve to zero instead of
//! failing, with the one exception of [`calculate_metrics`], which leaves
//! zero conversion rates unguarded.

pub mod channels;
pub mod delivery;
pub mod funnel;
pub mod media_mix;
pub mod portfolio;
pub mod reconcile;
pub mod view;
pub mod weekly;
pub mod window;

pub use channels::{aggregate_channels, ChannelReport, ChannelScorecard, StageCosts, StageRates};
pub use delivery::{percent_of, ratio_or_zero, Delivery, DeliveryStatus};
pub use funnel::{calculate_metrics, CalculatedMetrics};
pub use media_mix::{
    allocation_for_budget, forecast, is_manual_override, simulation_budget, ChannelForecast,
    ForecastTotals, MediaMixForecast,
};
pub use portfolio::{portfolio_analytics, PortfolioAnalytics, TrendPoint};
pub use reconcile::{
    reconcile_budget, reconcile_period, weekly_performance, BudgetSummary, PerformanceTable,
    PeriodSummary, RatioCheck, WeekPerformance,
};
pub use view::{project_view, ProjectView};
pub use weekly::{
    check_distribution, distribute_weeks, weekly_totals, DistributionCheck, WeeklyData,
    WeeklyTotals, AP_PER_AD,
};
pub use window::ReportingWindow;
