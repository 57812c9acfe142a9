//! Headline selection.

use super::context::ComparisonContext;
use super::templates::{
    dimension_label, family_headline_template, fill, headline_template, HeadlineKind,
};
use crate::domain::foundation::{format_currency, AreaSide};

/// Picks the headline before post-processing.
///
/// A rule profile frames the headline around the winner and its main driver.
/// Otherwise, in order: education-led when both EPIs exist and their gap
/// exceeds the EPI significance threshold; partial coverage when only one
/// EPI exists; price-led when the price gap is significant; similar profiles.
pub fn select_headline(ctx: &ComparisonContext<'_>) -> String {
    if let (Some(rule_profile), Some(winner)) = (ctx.rule_profile, ctx.winner) {
        let template = family_headline_template(rule_profile.life_stage, rule_profile.holding_horizon);
        return fill(
            template,
            &[
                ("winner", ctx.name(winner)),
                ("driver", dimension_label(ctx.driver(winner))),
            ],
        );
    }

    if ctx.deltas.epi.is_some() {
        if ctx.epi_gap_is_significant() {
            if let Some(headline) = education_headline(ctx) {
                return headline;
            }
        }
    } else if let Some(known) = ctx.coverage.epi.only() {
        return fill(
            headline_template(HeadlineKind::PartialEducationCoverage),
            &[("known", ctx.name(known))],
        );
    }

    let price_gap = ctx.deltas.price;
    if price_gap.abs() >= ctx.thresholds.price_significant {
        let cheaper = if price_gap < 0.0 { AreaSide::A } else { AreaSide::B };
        let value = format_currency(price_gap.abs());
        return fill(
            headline_template(HeadlineKind::PriceLed),
            &[
                ("better", ctx.name(cheaper)),
                ("worse", ctx.name(cheaper.other())),
                ("value", &value),
            ],
        );
    }

    similar_headline(ctx)
}

/// Education-led headline, when both EPIs exist and are not equal.
pub fn education_headline(ctx: &ComparisonContext<'_>) -> Option<String> {
    let epi_a = ctx.a.epi.as_ref()?.epi().value();
    let epi_b = ctx.b.epi.as_ref()?.epi().value();
    if epi_a == epi_b {
        return None;
    }

    let (better, better_value, worse_value) = if epi_a < epi_b {
        (AreaSide::A, epi_a, epi_b)
    } else {
        (AreaSide::B, epi_b, epi_a)
    };
    let better_value = format!("{:.0}", better_value);
    let worse_value = format!("{:.0}", worse_value);

    Some(fill(
        headline_template(HeadlineKind::EducationLed),
        &[
            ("better", ctx.name(better)),
            ("worse", ctx.name(better.other())),
            ("better_value", &better_value),
            ("worse_value", &worse_value),
        ],
    ))
}

/// Names are ordered alphabetically so the sentence does not depend on argument order.
fn similar_headline(ctx: &ComparisonContext<'_>) -> String {
    let mut names = [ctx.name(AreaSide::A), ctx.name(AreaSide::B)];
    names.sort_by_key(|name| name.to_lowercase());
    fill(
        headline_template(HeadlineKind::Similar),
        &[("first", names[0]), ("second", names[1])],
    )
}
