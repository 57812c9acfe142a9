//! Text templates - Every sentence the comparator can emit.
//!
//! Selection is a pure lookup keyed by topic, magnitude band or headline
//! kind; [`fill`] substitutes `{name}` placeholders. No free text is ever
//! composed outside these tables.

use serde::{Deserialize, Serialize};

use super::result::Confidence;
use super::thresholds::Magnitude;
use crate::domain::preference::{Dimension, HoldingHorizon, LifeStage};

/// The fixed trade-off topics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    EntryCost,
    Lease,
    School,
    Commute,
}

impl Topic {
    pub const ORDER: [Topic; 4] = [Topic::EntryCost, Topic::Lease, Topic::School, Topic::Commute];
}

/// Why a topic could not be sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    OneSide,
    Neither,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlineKind {
    EducationLed,
    PartialEducationCoverage,
    PriceLed,
    Similar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Verdict(Confidence),
    Override,
}

/// Trade-off sentence for a topic and magnitude.
///
/// Placeholders: `{better}`, `{worse}`, `{value}`, `{better_value}`,
/// `{worse_value}`, `{monthly}`, `{worse_risk}`, `{worse_level}`, `{worse_factor}`.
pub fn bullet_template(topic: Topic, magnitude: Magnitude) -> &'static str {
    use Magnitude::*;
    match (topic, magnitude) {
        (Topic::EntryCost, NotSignificant) => "Entry prices are close: the median gap is only {value}.",
        (Topic::EntryCost, Minor) => "{better} is slightly cheaper to buy into, by about {value} at the median.",
        (Topic::EntryCost, Moderate) => "{better} is meaningfully cheaper, about {value} less at the median (roughly {monthly} a month less on a typical loan).",
        (Topic::EntryCost, Major) => "{better} sits in a lower price bracket, about {value} cheaper at the median (roughly {monthly} a month less on a typical loan).",

        (Topic::Lease, NotSignificant) => "Remaining leases are comparable, within {value} years of each other.",
        (Topic::Lease, Minor) => "{better} has a slightly longer remaining lease, by about {value} years.",
        (Topic::Lease, Moderate) => "{better} offers a clearly longer lease runway, about {value} years more than {worse}.",
        (Topic::Lease, Major) => "{better} has a much longer remaining lease, {value} years more; lease risk in {worse} is {worse_risk}.",

        (Topic::School, NotSignificant) => "School-admission pressure is similar in both areas (EPIs within {value} points).",
        (Topic::School, Minor) => "{better} has slightly lower school-admission pressure (EPI {better_value} vs {worse_value}).",
        (Topic::School, Moderate) => "{better} has noticeably lower school-admission pressure (EPI {better_value} vs {worse_value}); in {worse} it is driven mainly by {worse_factor}.",
        (Topic::School, Major) => "{better} faces far less school-admission competition (EPI {better_value} vs {worse_value}); {worse} is at {worse_level} pressure.",

        (Topic::Commute, NotSignificant) => "Commute burden is similar for both areas.",
        (Topic::Commute, Minor) => "{better} has a slightly easier commute (CBI {better_value} vs {worse_value}).",
        (Topic::Commute, Moderate) => "{better} has a noticeably easier commute; the burden in {worse} is rated {worse_level}.",
        (Topic::Commute, Major) => "{better} has a much easier commute; the burden in {worse} is rated {worse_level} (CBI {worse_value}).",
    }
}

/// Sentence for a topic whose data is missing. Placeholders: `{known}`, `{value}`, `{level}`.
///
/// Only topics backed by optional data have coverage sentences.
pub fn coverage_template(topic: Topic, coverage: Coverage) -> Option<&'static str> {
    match (topic, coverage) {
        (Topic::School, Coverage::OneSide) => Some("School-admission pressure is only available for {known} (EPI {value}, {level}); the school comparison is incomplete."),
        (Topic::School, Coverage::Neither) => Some("School-admission pressure data is not available for either area."),
        (Topic::Commute, Coverage::OneSide) => Some("Commute burden is only available for {known} ({level})."),
        (Topic::Commute, Coverage::Neither) => Some("Commute burden data is not available for either area."),
        (Topic::EntryCost, _) | (Topic::Lease, _) => None,
    }
}

/// Generic headline. Placeholders: `{better}`, `{worse}`, `{value}`,
/// `{better_value}`, `{worse_value}`, `{known}`, `{first}`, `{second}`.
pub fn headline_template(kind: HeadlineKind) -> &'static str {
    match kind {
        HeadlineKind::EducationLed => "{better} offers a markedly calmer school landscape than {worse} (EPI {better_value} vs {worse_value}).",
        HeadlineKind::PartialEducationCoverage => "Education pressure data covers only {known}, so this comparison leans on price and lease.",
        HeadlineKind::PriceLed => "{better} is the more affordable option, about {value} cheaper at the median than {worse}.",
        HeadlineKind::Similar => "{first} and {second} have similar profiles; the choice comes down to priorities.",
    }
}

/// Headline for a family or planning-horizon profile. Placeholders: `{winner}`, `{driver}`.
///
/// A short or long horizon frames the headline; otherwise the life stage does.
pub fn family_headline_template(life_stage: LifeStage, horizon: HoldingHorizon) -> &'static str {
    match (horizon, life_stage) {
        (HoldingHorizon::Long, _) => "Over a long hold, {winner} looks the stronger home, chiefly on {driver}.",
        (HoldingHorizon::Short, _) => "For a shorter stay, {winner} edges ahead, mainly on {driver}.",
        (HoldingHorizon::Medium, LifeStage::SingleOrCouple) => "For a single buyer or couple, {winner} comes out ahead, mainly on {driver}.",
        (HoldingHorizon::Medium, LifeStage::YoungChildren) => "For a young family, {winner} comes out ahead, mainly on {driver}.",
        (HoldingHorizon::Medium, LifeStage::SchoolAgeChildren) => "For a family with school-age children, {winner} comes out ahead, mainly on {driver}.",
        (HoldingHorizon::Medium, LifeStage::EmptyNest) => "For empty nesters, {winner} comes out ahead, mainly on {driver}.",
    }
}

/// Decision hint. Placeholders: `{winner}`, `{mode}`, `{other}`, `{reason}`.
pub fn hint_template(kind: HintKind) -> &'static str {
    match kind {
        HintKind::Verdict(Confidence::ClearWinner) => "{winner} is the clear choice under the {mode} priority.",
        HintKind::Verdict(Confidence::DependsOnPreference) => "{winner} comes out ahead under the {mode} priority, but a different priority could change the answer.",
        HintKind::Verdict(Confidence::Balanced) => "The two areas are closely matched under the {mode} priority; visit both before deciding.",
        HintKind::Override => "{other} is the safer choice here. {reason}",
    }
}

/// Reader-facing name of a dimension, used as a headline driver.
pub fn dimension_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Cost => "entry cost",
        Dimension::Lease => "lease runway",
        Dimension::School => "school pressure",
        Dimension::Stability => "price stability",
        Dimension::Rent => "rental yield",
    }
}

/// Replaces each `{name}` with its value. Unknown placeholders are left as-is.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (name, value) in vars {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}
