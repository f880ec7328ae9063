//! Decoding of enumerated form fields.
//!
//! Every option label of every locale is registered in an explicit
//! `label -> code` table per field, so decoding never depends on how a label
//! is spelled or which locale produced it.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use shared::{
    domain::{Feature, FeatureDomain, FeatureVector, LocaleId},
    protocol::{Choice, PredictionForm},
};

use crate::{catalog, CatalogError, SessionError};

const VESSEL_LABELS: [&str; 4] = ["0", "1", "2", "3"];

type OptionTables = HashMap<Feature, HashMap<String, u8>>;

static TABLES: Lazy<Result<OptionTables, CatalogError>> = Lazy::new(build_tables);

fn build_tables() -> Result<OptionTables, CatalogError> {
    let mut tables = OptionTables::new();
    for locale in LocaleId::ALL {
        let table = catalog::locale(locale)?;
        for feature in Feature::ALL {
            let labels: Vec<(String, u8)> = match feature {
                Feature::Sex => vec![
                    (required_text(table, "male")?, 1),
                    (required_text(table, "female")?, 0),
                ],
                Feature::Ca => VESSEL_LABELS
                    .iter()
                    .zip(0u8..)
                    .map(|(label, code)| (label.to_string(), code))
                    .collect(),
                _ if feature.is_enumerated() => {
                    let key = format!("{}_options", feature.name());
                    let options = table.options(&key).ok_or_else(|| {
                        CatalogError(format!("{locale:?} is missing '{key}'"))
                    })?;
                    options.iter().cloned().zip(0u8..).collect()
                }
                _ => continue,
            };
            let FeatureDomain::Code { max } = feature.domain() else {
                continue;
            };
            if labels.len() != usize::from(max) + 1 {
                return Err(CatalogError(format!(
                    "{locale:?} lists {} options for {feature}, expected {}",
                    labels.len(),
                    usize::from(max) + 1
                )));
            }
            let field = tables.entry(feature).or_default();
            for (label, code) in labels {
                let label = label.trim().to_string();
                match field.get(&label) {
                    Some(existing) if *existing != code => {
                        return Err(CatalogError(format!(
                            "label '{label}' for {feature} maps to both {existing} and {code}"
                        )));
                    }
                    _ => {
                        field.insert(label, code);
                    }
                }
            }
        }
    }
    Ok(tables)
}

fn required_text(table: &catalog::LocaleTable, key: &str) -> Result<String, CatalogError> {
    table
        .text(key)
        .map(str::to_string)
        .ok_or_else(|| CatalogError(format!("{:?} is missing '{key}'", table.locale)))
}

/// Maps an enumerated field's choice to its numeric code.
pub fn decode_choice(feature: Feature, choice: &Choice) -> Result<u8, SessionError> {
    let FeatureDomain::Code { max } = feature.domain() else {
        return Err(SessionError::validation(
            feature.name(),
            "is not an enumerated field",
        ));
    };
    match choice {
        Choice::Code(code) if *code <= max => Ok(*code),
        Choice::Code(code) => Err(SessionError::validation(
            feature.name(),
            format!("code {code} is outside 0..={max}"),
        )),
        Choice::Label(label) => {
            let tables = TABLES.as_ref().map_err(CatalogError::clone)?;
            tables
                .get(&feature)
                .and_then(|field| field.get(label.trim()))
                .copied()
                .ok_or_else(|| {
                    SessionError::validation(feature.name(), format!("unknown option '{label}'"))
                })
        }
    }
}

/// Builds a validated [`FeatureVector`] from raw form values.
pub fn decode_form(form: &PredictionForm) -> Result<FeatureVector, SessionError> {
    let vector = FeatureVector {
        age: form.age,
        sex: decode_choice(Feature::Sex, &form.sex)?,
        cp: decode_choice(Feature::Cp, &form.cp)?,
        trestbps: form.trestbps,
        chol: form.chol,
        fbs: decode_choice(Feature::Fbs, &form.fbs)?,
        restecg: decode_choice(Feature::Restecg, &form.restecg)?,
        thalach: form.thalach,
        exang: decode_choice(Feature::Exang, &form.exang)?,
        oldpeak: form.oldpeak,
        slope: decode_choice(Feature::Slope, &form.slope)?,
        ca: decode_choice(Feature::Ca, &form.ca)?,
        thal: decode_choice(Feature::Thal, &form.thal)?,
    };
    vector.validate()?;
    Ok(vector)
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
