//! Post-processing rules applied to a draft verdict, in a fixed order.
//!
//! | # | Rule | Precondition | Effect |
//! |---|------|--------------|--------|
//! | 1 | [`HardRuleOutcome`] | any hard rule triggered | append warnings; an override on one side rewrites the decision hint to the other side |
//! | 2 | [`ForceSchoolMention`] | school lens, or EPI levels differ | move the school bullet to the front; when the levels differ, or under the school lens when the EPI gap is significant, lead the headline with education pressure |
//!
//! Rule 2 runs after rule 1 and after headline selection, so it takes
//! precedence over any lens-driven headline.

use super::bullets::topic_bullet;
use super::context::ComparisonContext;
use super::headline::education_headline;
use super::result::TradeoffBullet;
use super::templates::{fill, hint_template, HintKind, Topic};
use crate::domain::foundation::AreaSide;
use crate::domain::preference::{ModeId, RuleEffect};

/// The mutable part of a comparison result.
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictDraft {
    pub headline: String,
    pub bullets: Vec<TradeoffBullet>,
    pub decision_hint: String,
    pub overridden: bool,
    pub warnings: Vec<String>,
}

pub trait PostProcessRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies(&self, ctx: &ComparisonContext<'_>, draft: &VerdictDraft) -> bool;

    fn apply(&self, ctx: &ComparisonContext<'_>, draft: &mut VerdictDraft);
}

/// Rules in application order.
pub const POST_PROCESS_RULES: &[&dyn PostProcessRule] = &[&HardRuleOutcome, &ForceSchoolMention];

/// Applies every rule whose precondition holds, in order.
pub fn apply_post_processing(ctx: &ComparisonContext<'_>, draft: &mut VerdictDraft) {
    for rule in POST_PROCESS_RULES {
        if rule.applies(ctx, draft) {
            tracing::trace!(rule = rule.name(), "post-processing rule applied");
            rule.apply(ctx, draft);
        }
    }
}

pub struct HardRuleOutcome;

impl PostProcessRule for HardRuleOutcome {
    fn name(&self) -> &'static str {
        "hard_rule_outcome"
    }

    fn applies(&self, ctx: &ComparisonContext<'_>, _draft: &VerdictDraft) -> bool {
        !ctx.violations.is_empty()
    }

    fn apply(&self, ctx: &ComparisonContext<'_>, draft: &mut VerdictDraft) {
        draft
            .warnings
            .extend(ctx.violations.iter().map(|v| v.message.clone()));

        let overrides: Vec<_> = ctx
            .violations
            .iter()
            .filter(|v| v.effect == RuleEffect::Override)
            .collect();

        let Some(first) = overrides.first() else {
            return;
        };

        // With both areas in violation there is no safer side to point to
        if overrides.iter().any(|v| v.side != first.side) {
            return;
        }

        let other: AreaSide = first.side.other();
        draft.decision_hint = fill(
            hint_template(HintKind::Override),
            &[("other", ctx.name(other)), ("reason", &first.message)],
        );
        draft.overridden = true;
    }
}

pub struct ForceSchoolMention;

impl ForceSchoolMention {
    fn school_lens(ctx: &ComparisonContext<'_>) -> bool {
        ctx.mode.id == ModeId::LowSchoolPressure
    }

    fn levels_differ(ctx: &ComparisonContext<'_>) -> bool {
        match (ctx.metrics.a.pressure_level(), ctx.metrics.b.pressure_level()) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    /// Education may lead the headline only when the EPI difference matters.
    fn rewrites_headline(ctx: &ComparisonContext<'_>) -> bool {
        Self::levels_differ(ctx) || (Self::school_lens(ctx) && ctx.epi_gap_is_significant())
    }
}

impl PostProcessRule for ForceSchoolMention {
    fn name(&self) -> &'static str {
        "force_school_mention"
    }

    fn applies(&self, ctx: &ComparisonContext<'_>, _draft: &VerdictDraft) -> bool {
        Self::school_lens(ctx) || Self::levels_differ(ctx)
    }

    fn apply(&self, ctx: &ComparisonContext<'_>, draft: &mut VerdictDraft) {
        let school = match draft.bullets.iter().position(|b| b.topic == Topic::School) {
            Some(index) => draft.bullets.remove(index),
            None => {
                // Keep within the bullet budget by dropping the last bullet
                if draft.bullets.len() >= ctx.mode.max_bullets.max(1) {
                    draft.bullets.pop();
                }
                topic_bullet(ctx, Topic::School)
            }
        };
        draft.bullets.insert(0, school);

        if Self::rewrites_headline(ctx) {
            if let Some(headline) = education_headline(ctx) {
                draft.headline = headline;
            }
        }
    }
}
