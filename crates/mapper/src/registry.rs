use crate::catalog::RegistryGender;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Patient-profile creation payload as the registry's profile endpoint
/// expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryPatientProfile {
    pub patient: RegistryPatient,
    /// Reserved by the registry API; always empty here.
    pub relationships: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryPatient {
    pub person: RegistryPerson,
    pub identifiers: Vec<RegistryIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryPerson {
    pub names: Vec<RegistryName>,
    pub gender: RegistryGender,
    /// Date string, or empty when the source record has none.
    pub birthdate: String,
    /// Never empty: an absent source address still yields one all-empty
    /// entry, which the registry requires.
    pub addresses: Vec<RegistryAddress>,
    pub attributes: Vec<PersonAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryName {
    pub given_name: String,
    pub middle_name: String,
    pub family_name: String,
    pub display: String,
    pub preferred: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryAddress {
    pub address1: String,
    pub address2: String,
    pub city_village: String,
    pub county_district: String,
    pub state_province: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAttribute {
    pub attribute_type: AttributeTypeRef,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTypeRef {
    pub uuid: Uuid,
}

/// Structural placeholder identifier the registry expects on creation. The
/// actual national identifier travels as a person attribute instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryIdentifier {
    pub identifier_source_uuid: Uuid,
    pub identifier_prefix: String,
    pub identifier_type: Uuid,
    pub preferred: bool,
    pub voided: bool,
}

/// Registry profile as returned by a lookup. Only the members the reverse
/// mapping reads are modelled; all of them decode with defaults, so a
/// sparse profile still maps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryProfileView {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub person: RegistryPersonView,
    #[serde(default)]
    pub identifiers: Vec<RegistryIdentifierView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryPersonView {
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<RegistryNameView>,
    #[serde(default)]
    pub preferred_address: Option<RegistryAddressView>,
    /// Raw person attributes, carried into the clinical record verbatim.
    #[serde(default)]
    pub attributes: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryNameView {
    #[serde(default)]
    pub display: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryAddressView {
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub links: Vec<RegistryLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryLink {
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryIdentifierView {
    #[serde(default)]
    pub display: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_view_decodes_from_a_sparse_lookup() {
        let view: RegistryProfileView = serde_json::from_value(json!({
            "uuid": "f0f8a2c4-0000-0000-0000-0000000000ff",
            "person": { "gender": "F" },
        }))
        .unwrap();

        assert_eq!(view.uuid.as_deref(), Some("f0f8a2c4-0000-0000-0000-0000000000ff"));
        assert_eq!(view.person.gender, "F");
        assert!(view.person.preferred_name.is_none());
        assert!(view.identifiers.is_empty());
    }

    #[test]
    fn profile_view_decodes_from_an_empty_object() {
        let view: RegistryProfileView = serde_json::from_value(json!({})).unwrap();
        assert!(view.uuid.is_none());
        assert!(view.person.birthdate.is_none());
    }

    #[test]
    fn creation_payload_uses_the_registry_field_names() {
        let profile = RegistryPatientProfile {
            patient: RegistryPatient {
                person: RegistryPerson {
                    names: vec![RegistryName {
                        given_name: "Ana".to_string(),
                        middle_name: String::new(),
                        family_name: "Pérez".to_string(),
                        display: "Ana Pérez".to_string(),
                        preferred: true,
                    }],
                    gender: RegistryGender::Female,
                    birthdate: "1990-05-01".to_string(),
                    addresses: vec![RegistryAddress::default()],
                    attributes: Vec::new(),
                },
                identifiers: Vec::new(),
            },
            relationships: Vec::new(),
        };

        let value = serde_json::to_value(&profile).unwrap();
        let name = &value["patient"]["person"]["names"][0];
        assert_eq!(name["givenName"], "Ana");
        assert_eq!(name["familyName"], "Pérez");
        assert_eq!(value["patient"]["person"]["gender"], "F");
        assert_eq!(
            value["patient"]["person"]["addresses"][0]["cityVillage"],
            ""
        );
    }
}
