//! Number formatting shared by rule messages and comparison text.

/// Formats a currency amount as whole dollars with thousands separators, e.g. `$1,250,000`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && rounded > 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Formats a year count with one decimal only when it carries information.
pub fn format_years(years: f64) -> String {
    if (years - years.round()).abs() < 0.05 {
        format!("{:.0}", years)
    } else {
        format!("{:.1}", years)
    }
}
