//! Turns one [`CountryRecord`] into the text and flag the explorer shows.
//!
//! Lines are emitted only for attributes present in the record, in a fixed
//! order. Nothing is rendered as blank or "N/A".

use serde_json::Number;

use crate::country::{CountryRecord, Currency};
use crate::flag::{FlagRef, FlagSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBundle {
    pub title: String,
    pub info_block: String,
    pub details_block: String,
    pub flag: FlagRef,
}

pub fn present(record: &CountryRecord, flags: &impl FlagSource) -> DisplayBundle {
    DisplayBundle {
        title: title(record),
        info_block: info_block(record),
        details_block: details_block(record),
        flag: resolve_flag(record, flags),
    }
}

pub fn title(record: &CountryRecord) -> String {
    format!("{} ({})", record.name.common, record.name.official)
}

/// One line per present field, each terminated by `\n`.
pub fn info_block(record: &CountryRecord) -> String {
    let mut lines = Vec::new();

    if let Some(capital) = &record.capital {
        lines.push(format!("Capital: {}", capital.join(", ")));
    }
    if let Some(region) = &record.region {
        lines.push(format!("Region: {}", region));
    }
    if let Some(population) = &record.population {
        lines.push(format!("Population: {}", format_thousands(population)));
    }
    if let Some(area) = &record.area {
        lines.push(format!("Area: {} km²", format_thousands(area)));
    }
    if let Some(languages) = &record.languages {
        let names: Vec<&str> = languages.values().map(String::as_str).collect();
        lines.push(format!("Languages: {}", names.join(", ")));
    }
    if let Some(currencies) = &record.currencies {
        let labels: Vec<String> = currencies.values().map(currency_label).collect();
        lines.push(format!("Currency: {}", labels.join(", ")));
    }
    if let Some(timezones) = &record.timezones {
        lines.push(format!("Timezones: {}", timezones.join(", ")));
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Present fields joined by `\n`, no trailing break.
pub fn details_block(record: &CountryRecord) -> String {
    let mut entries = Vec::new();

    if let Some(subregion) = &record.subregion {
        entries.push(format!("Subregion: {}", subregion));
    }
    if let Some(tld) = &record.tld {
        entries.push(format!("Domain: {}", tld.join(", ")));
    }
    if let Some(idd) = &record.idd {
        if let Some(root) = &idd.root {
            let suffix = idd
                .suffixes
                .as_ref()
                .and_then(|s| s.first())
                .map_or("", String::as_str);
            entries.push(format!("Calling Code: {}{}", root, suffix));
        }
    }
    if let Some(side) = record.car.as_ref().and_then(|car| car.side.as_ref()) {
        entries.push(format!("Drives on: {} side", side));
    }
    if let Some(start) = &record.start_of_week {
        entries.push(format!("Start of week: {}", start));
    }

    entries.join("\n")
}

pub fn resolve_flag(record: &CountryRecord, flags: &impl FlagSource) -> FlagRef {
    let Some(url) = record.flag_png() else {
        return FlagRef::Missing;
    };

    match flags.load_flag(url) {
        Ok(image) => FlagRef::Image(image),
        Err(err) => {
            log::warn!("Flag for {} failed to load: {}", record.common_name(), err);
            FlagRef::LoadError(err.to_string())
        }
    }
}

fn currency_label(currency: &Currency) -> String {
    match &currency.symbol {
        Some(symbol) => format!("{} ({})", currency.name, symbol),
        None => currency.name.clone(),
    }
}

/// Formats a JSON number with `,` between thousands.
///
/// Integers stay integers (`125,000,000`); floats keep their fractional
/// part, including a whole-number `.0` (`377,930.0`).
pub fn format_thousands(n: &Number) -> String {
    if let Some(v) = n.as_u64() {
        return group_digits(&v.to_string());
    }
    if let Some(v) = n.as_i64() {
        return format!("-{}", group_digits(&v.unsigned_abs().to_string()));
    }

    let v = n.as_f64().unwrap_or_default();
    let text = if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    };
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };

    match unsigned.split_once('.') {
        Some((whole, frac)) => format!("{}{}.{}", sign, group_digits(whole), frac),
        None => format!("{}{}", sign, group_digits(unsigned)),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
