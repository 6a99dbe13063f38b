use crate::catalog::{Gender, MapperCatalog};
use crate::clinical::{ClinicalAddress, ClinicalIdentifier, ClinicalPatient, Extension, HumanName};
use crate::registry::RegistryProfileView;

/// Maps a registry profile lookup onto a clinical patient resource.
///
/// Like the forward direction this never fails; missing nested members
/// degrade to empty or absent values. The reverse mapping is deliberately
/// lossy: registry person attributes are carried into the clinical
/// `extension` sequence verbatim, with no reverse lookup against the
/// attribute catalog.
#[derive(Debug, Clone)]
pub struct RegistryToClinicalMapper {
    catalog: MapperCatalog,
}

impl RegistryToClinicalMapper {
    pub fn new(catalog: MapperCatalog) -> Self {
        Self { catalog }
    }

    pub fn map(&self, profile: &RegistryProfileView) -> ClinicalPatient {
        let identifier = profile
            .identifiers
            .first()
            .map(|entry| ClinicalIdentifier {
                system: self.catalog.main_identifier_system.clone(),
                value: identifier_value_from_display(&entry.display),
            })
            .into_iter()
            .collect();

        let display = profile
            .person
            .preferred_name
            .as_ref()
            .map(|name| name.display.as_str())
            .unwrap_or("");
        let (given, family) = split_display_name(display);

        let address = match &profile.person.preferred_address {
            Some(preferred) => vec![ClinicalAddress {
                line: vec![preferred.display.clone()],
                url: vec![preferred
                    .links
                    .first()
                    .map(|link| link.uri.clone())
                    .unwrap_or_default()],
                ..ClinicalAddress::default()
            }],
            None => Vec::new(),
        };

        // Only the date portion of the registry's datetime survives. An
        // empty birthdate counts as absent, not as an empty string.
        let birth_date = profile
            .person
            .birthdate
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| value.split('T').next().unwrap_or(value).to_string());

        let extension = profile
            .person
            .attributes
            .iter()
            .cloned()
            .map(|attribute| serde_json::from_value::<Extension>(attribute).unwrap_or_default())
            .collect();

        ClinicalPatient {
            resource_type: Some("Patient".to_string()),
            id: profile.uuid.clone(),
            name: vec![HumanName {
                given,
                family,
                extension: Vec::new(),
            }],
            gender: Some(
                Gender::from_registry_code(&profile.person.gender)
                    .as_str()
                    .to_string(),
            ),
            birth_date,
            address,
            telecom: Vec::new(),
            identifier,
            extension,
        }
    }
}

impl Default for RegistryToClinicalMapper {
    fn default() -> Self {
        Self::new(MapperCatalog::default())
    }
}

/// Extracts the identifier value from a registry display string.
///
/// The registry renders identifiers as `"<label> = <value>"`: everything
/// after the last `=` is the value, trimmed of surrounding whitespace. A
/// display with no `=` is taken whole, trimmed. The convention is an
/// upstream display-formatting detail — if the registry ever changes it,
/// this returns a wrong value rather than failing.
pub fn identifier_value_from_display(display: &str) -> String {
    display.rsplit('=').next().unwrap_or(display).trim().to_string()
}

/// Splits a preferred-name display into given tokens and a family name.
///
/// The last whitespace-separated token is the family name and everything
/// before it is given, in order. A single token is a family name on its
/// own; an empty display yields two empty parts.
pub fn split_display_name(display: &str) -> (Vec<String>, String) {
    let mut tokens: Vec<String> = display.split_whitespace().map(str::to_string).collect();
    match tokens.pop() {
        Some(family) => (tokens, family),
        None => (Vec::new(), String::new()),
    }
}
