//! Recorded channel funnels to cost per stage.

use estateflow_core::{ChannelPerformance, MediaChannel};
use serde::Serialize;

use crate::delivery::{percent_of, ratio_or_zero};

/// Spend divided by each funnel stage, in the display presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCosts {
    pub display_spend: f64,
    pub cpl: f64,
    /// Per qualified lead (assigned to sales).
    pub cp_qualified: f64,
    pub cp_ap: f64,
    pub cp_ad: f64,
}

impl StageCosts {
    fn new(performance: &ChannelPerformance, tax_multiplier: f64) -> Self {
        let display_spend = performance.spends * tax_multiplier;
        Self {
            display_spend,
            cpl: ratio_or_zero(display_spend, performance.leads),
            cp_qualified: ratio_or_zero(display_spend, performance.assigned_to_sales),
            cp_ap: ratio_or_zero(display_spend, performance.ap),
            cp_ad: ratio_or_zero(display_spend, performance.ad),
        }
    }
}

/// Each funnel stage as a percentage of leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRates {
    pub open_attempted: f64,
    pub contacted: f64,
    pub assigned_to_sales: f64,
    pub ap: f64,
    pub ad: f64,
    pub bookings: f64,
    pub lost: f64,
}

impl StageRates {
    fn new(p: &ChannelPerformance) -> Self {
        Self {
            open_attempted: percent_of(p.open_attempted, p.leads),
            contacted: percent_of(p.contacted, p.leads),
            assigned_to_sales: percent_of(p.assigned_to_sales, p.leads),
            ap: percent_of(p.ap, p.leads),
            ad: percent_of(p.ad, p.leads),
            bookings: percent_of(p.bookings, p.leads),
            lost: percent_of(p.lost, p.leads),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelScorecard {
    pub channel_id: String,
    pub name: String,
    /// `false` when the channel has no recorded performance.
    pub recorded: bool,
    pub performance: ChannelPerformance,
    pub costs: StageCosts,
    pub rates: StageRates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelReport {
    pub channels: Vec<ChannelScorecard>,
    /// Field-wise sums over every channel.
    pub totals: ChannelPerformance,
    /// Costs derived from the summed counts.
    pub total_costs: StageCosts,
    pub total_rates: StageRates,
}

/// Score every channel of the media mix against its recorded funnel.
///
/// Channels without a record score as all zero. Performance recorded for a
/// channel id no longer in the mix is ignored.
#[must_use]
pub fn aggregate_channels(
    channels: &[MediaChannel],
    performance: &[ChannelPerformance],
    tax_multiplier: f64,
) -> ChannelReport {
    let scorecards: Vec<ChannelScorecard> = channels
        .iter()
        .map(|ch| {
            let record = performance.iter().find(|p| p.channel_id == ch.id);
            let perf = record
                .cloned()
                .unwrap_or_else(|| ChannelPerformance::empty(ch.id.clone()));
            ChannelScorecard {
                channel_id: ch.id.clone(),
                name: ch.name.clone(),
                recorded: record.is_some(),
                costs: StageCosts::new(&perf, tax_multiplier),
                rates: StageRates::new(&perf),
                performance: perf,
            }
        })
        .collect();

    let totals = scorecards
        .iter()
        .fold(ChannelPerformance::empty("total"), |acc, s| {
            sum_performance(acc, &s.performance)
        });

    ChannelReport {
        total_costs: StageCosts::new(&totals, tax_multiplier),
        total_rates: StageRates::new(&totals),
        channels: scorecards,
        totals,
    }
}

fn sum_performance(acc: ChannelPerformance, p: &ChannelPerformance) -> ChannelPerformance {
    ChannelPerformance {
        channel_id: acc.channel_id,
        spends: acc.spends + p.spends,
        leads: acc.leads + p.leads,
        open_attempted: acc.open_attempted + p.open_attempted,
        contacted: acc.contacted + p.contacted,
        assigned_to_sales: acc.assigned_to_sales + p.assigned_to_sales,
        ap: acc.ap + p.ap,
        ad: acc.ad + p.ad,
        bookings: acc.bookings + p.bookings,
        lost: acc.lost + p.lost,
    }
}
