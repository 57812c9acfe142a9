//! Trade-off bullets - One sized sentence per fixed topic.

use super::context::ComparisonContext;
use super::result::TradeoffBullet;
use super::templates::{bullet_template, coverage_template, fill, Coverage, Topic};
use super::thresholds::Magnitude;
use crate::domain::foundation::{format_currency, format_years, AreaSide};

/// Builds every topic's bullet in display order.
pub fn build_bullets(ctx: &ComparisonContext<'_>) -> Vec<TradeoffBullet> {
    Topic::ORDER.iter().map(|topic| topic_bullet(ctx, *topic)).collect()
}

pub fn topic_bullet(ctx: &ComparisonContext<'_>, topic: Topic) -> TradeoffBullet {
    match topic {
        Topic::EntryCost => entry_cost_bullet(ctx),
        Topic::Lease => lease_bullet(ctx),
        Topic::School => school_bullet(ctx),
        Topic::Commute => commute_bullet(ctx),
    }
}

fn entry_cost_bullet(ctx: &ComparisonContext<'_>) -> TradeoffBullet {
    let delta = ctx.deltas.price;
    let magnitude = ctx.thresholds.price_bands.classify(delta);
    let better = lower_side(delta);

    let monthly_gap = (ctx.a.profile.financing().monthly_instalment
        - ctx.b.profile.financing().monthly_instalment)
        .abs();

    sized_bullet(
        ctx,
        Topic::EntryCost,
        magnitude,
        better,
        &[
            ("value", format_currency(delta.abs())),
            ("monthly", format_currency(monthly_gap)),
        ],
        |_| Vec::new(),
    )
}

fn lease_bullet(ctx: &ComparisonContext<'_>) -> TradeoffBullet {
    let delta = ctx.deltas.lease_years;
    let magnitude = ctx.thresholds.lease_bands.classify(delta);
    let better = lower_side(delta).map(|s| s.other());

    sized_bullet(
        ctx,
        Topic::Lease,
        magnitude,
        better,
        &[("value", format_years(delta.abs()))],
        |worse| {
            let risk = ctx.side(worse).profile.signals().lease_risk.level;
            vec![("worse_risk", risk.label().to_string())]
        },
    )
}

fn school_bullet(ctx: &ComparisonContext<'_>) -> TradeoffBullet {
    let (epi_a, epi_b) = match (&ctx.a.epi, &ctx.b.epi) {
        (Some(a), Some(b)) => (a, b),
        (Some(known), None) | (None, Some(known)) => {
            let side = if ctx.a.epi.is_some() { AreaSide::A } else { AreaSide::B };
            return coverage_bullet(
                Topic::School,
                Coverage::OneSide,
                &[
                    ("known", ctx.name(side).to_string()),
                    ("value", format!("{:.0}", known.epi().value())),
                    ("level", known.level().label().to_string()),
                ],
            );
        }
        (None, None) => return coverage_bullet(Topic::School, Coverage::Neither, &[]),
    };

    let delta = epi_a.epi().value() - epi_b.epi().value();
    let magnitude = ctx.thresholds.epi_bands.classify(delta);
    let better = lower_side(delta);

    sized_bullet(
        ctx,
        Topic::School,
        magnitude,
        better,
        &[("value", format!("{:.0}", delta.abs()))],
        |worse| {
            let (better_epi, worse_epi) = match worse {
                AreaSide::A => (epi_b, epi_a),
                AreaSide::B => (epi_a, epi_b),
            };
            vec![
                ("better_value", format!("{:.0}", better_epi.epi().value())),
                ("worse_value", format!("{:.0}", worse_epi.epi().value())),
                ("worse_level", worse_epi.level().label().to_string()),
                ("worse_factor", worse_epi.dominant_factor().label().to_string()),
            ]
        },
    )
}

fn commute_bullet(ctx: &ComparisonContext<'_>) -> TradeoffBullet {
    let (cbi_a, cbi_b) = match (&ctx.a.cbi, &ctx.b.cbi) {
        (Some(a), Some(b)) => (a, b),
        (Some(known), None) | (None, Some(known)) => {
            let side = if ctx.a.cbi.is_some() { AreaSide::A } else { AreaSide::B };
            return coverage_bullet(
                Topic::Commute,
                Coverage::OneSide,
                &[
                    ("known", ctx.name(side).to_string()),
                    ("level", known.level.label().to_string()),
                ],
            );
        }
        (None, None) => return coverage_bullet(Topic::Commute, Coverage::Neither, &[]),
    };

    let delta = cbi_a.cbi.value() - cbi_b.cbi.value();
    let magnitude = ctx.thresholds.cbi_bands.classify(delta);
    let better = lower_side(delta);

    sized_bullet(
        ctx,
        Topic::Commute,
        magnitude,
        better,
        &[],
        |worse| {
            let (better_cbi, worse_cbi) = match worse {
                AreaSide::A => (cbi_b, cbi_a),
                AreaSide::B => (cbi_a, cbi_b),
            };
            vec![
                ("better_value", format!("{:.0}", better_cbi.cbi.value())),
                ("worse_value", format!("{:.0}", worse_cbi.cbi.value())),
                ("worse_level", worse_cbi.level.label().to_string()),
            ]
        },
    )
}

/// A − B below zero means A has the lower value.
fn lower_side(delta: f64) -> Option<AreaSide> {
    if delta < 0.0 {
        Some(AreaSide::A)
    } else if delta > 0.0 {
        Some(AreaSide::B)
    } else {
        None
    }
}

/// Fills the topic's template for its magnitude.
///
/// `worse_vars` supplies placeholders that need to know which side lost; it
/// is only called when the difference is significant and has a direction.
fn sized_bullet<F>(
    ctx: &ComparisonContext<'_>,
    topic: Topic,
    magnitude: Magnitude,
    better: Option<AreaSide>,
    vars: &[(&str, String)],
    worse_vars: F,
) -> TradeoffBullet
where
    F: FnOnce(AreaSide) -> Vec<(&'static str, String)>,
{
    let mut all: Vec<(&str, String)> = vars.to_vec();

    let favors = match better {
        Some(better) if magnitude > Magnitude::NotSignificant => {
            let worse = better.other();
            all.push(("better", ctx.name(better).to_string()));
            all.push(("worse", ctx.name(worse).to_string()));
            all.extend(worse_vars(worse));
            Some(better)
        }
        _ => None,
    };

    // A significant magnitude always has a direction, so NotSignificant is the only fallback
    let magnitude = if favors.is_some() {
        magnitude
    } else {
        Magnitude::NotSignificant
    };

    let borrowed: Vec<(&str, &str)> = all.iter().map(|(k, v)| (*k, v.as_str())).collect();
    TradeoffBullet {
        topic,
        magnitude: Some(magnitude),
        favors,
        text: fill(bullet_template(topic, magnitude), &borrowed),
    }
}

fn coverage_bullet(
    topic: Topic,
    coverage: Coverage,
    vars: &[(&str, String)],
) -> TradeoffBullet {
    let borrowed: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let text = coverage_template(topic, coverage)
        .map(|template| fill(template, &borrowed))
        .unwrap_or_default();

    TradeoffBullet {
        topic,
        magnitude: None,
        favors: None,
        text,
    }
}
