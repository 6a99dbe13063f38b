use crate::catalog::{AttributeKind, BiologicalSex, MapperCatalog, RegistryGender};
use crate::clinical::{ClinicalAddress, ClinicalPatient, HumanName};
use crate::registry::{
    AttributeTypeRef, PersonAttribute, RegistryAddress, RegistryIdentifier, RegistryName,
    RegistryPatient, RegistryPatientProfile, RegistryPerson,
};

/// Maps a clinical patient resource onto the registry's patient-profile
/// creation payload.
///
/// The mapping never fails: absent members degrade to empty strings, empty
/// sequences or omitted attributes. Locale extensions and coded telecom
/// entries become person attributes from the closed catalog; everything
/// unrecognised is dropped.
#[derive(Debug, Clone)]
pub struct ClinicalToRegistryMapper {
    catalog: MapperCatalog,
}

impl ClinicalToRegistryMapper {
    pub fn new(catalog: MapperCatalog) -> Self {
        Self { catalog }
    }

    pub fn map(&self, clinical: &ClinicalPatient) -> RegistryPatientProfile {
        let person = RegistryPerson {
            names: vec![registry_name(clinical.name.first())],
            gender: RegistryGender::from_clinical(clinical.gender.as_deref().unwrap_or("")),
            birthdate: clinical.birth_date.clone().unwrap_or_default(),
            addresses: vec![registry_address(clinical.address.first())],
            attributes: self.person_attributes(clinical),
        };

        RegistryPatientProfile {
            patient: RegistryPatient {
                person,
                identifiers: vec![RegistryIdentifier {
                    identifier_source_uuid: self.catalog.identifier_source,
                    identifier_prefix: self.catalog.identifier_prefix.clone(),
                    identifier_type: self.catalog.identifier_type,
                    preferred: true,
                    voided: false,
                }],
            },
            relationships: Vec::new(),
        }
    }

    fn person_attributes(&self, clinical: &ClinicalPatient) -> Vec<PersonAttribute> {
        let mut attributes = Vec::new();

        // Contact points first, in input order.
        for contact in &clinical.telecom {
            let kind = match contact.system.as_str() {
                "phone" => AttributeKind::PhoneNumber,
                "email" => AttributeKind::EmailAddress,
                _ => continue,
            };
            attributes.push(self.attribute(kind, contact.value.clone()));
        }

        // The national identifier travels as a person attribute; other
        // identifier systems are not the registry's concern.
        for identifier in &clinical.identifier {
            if identifier.system == self.catalog.national_id_system {
                attributes.push(self.attribute(AttributeKind::NationalId, identifier.value.clone()));
            }
        }

        // The second family name rides as an extension on the first name
        // entry.
        if let Some(name) = clinical.name.first() {
            for ext in &name.extension {
                if ext.url != self.catalog.second_family_name_url {
                    continue;
                }
                if let Some(value) = ext.value_string.as_deref().filter(|v| !v.is_empty()) {
                    attributes
                        .push(self.attribute(AttributeKind::SecondFamilyName, value.to_string()));
                }
            }
        }

        for ext in &clinical.extension {
            if ext.url == self.catalog.biological_sex_url {
                let code = ext
                    .value_codeable_concept
                    .as_ref()
                    .and_then(|concept| concept.first_code());
                if let Some(code) = code {
                    match BiologicalSex::from_code(code) {
                        Some(sex) => attributes.push(self.attribute(
                            AttributeKind::BiologicalSex,
                            self.catalog.sex_concepts.get(sex).to_string(),
                        )),
                        None => {
                            tracing::debug!(code, "unrecognised biological-sex code, dropped");
                        }
                    }
                }
            } else if ext.url == self.catalog.nationality_url {
                let display = ext
                    .value_codeable_concept
                    .as_ref()
                    .and_then(|concept| concept.first_display());
                if let Some(display) = display {
                    attributes.push(self.attribute(AttributeKind::Nationality, display.to_string()));
                }
            }
        }

        attributes
    }

    fn attribute(&self, kind: AttributeKind, value: String) -> PersonAttribute {
        PersonAttribute {
            attribute_type: AttributeTypeRef {
                uuid: self.catalog.attribute_types.get(kind),
            },
            value,
        }
    }
}

impl Default for ClinicalToRegistryMapper {
    fn default() -> Self {
        Self::new(MapperCatalog::default())
    }
}

fn registry_name(name: Option<&HumanName>) -> RegistryName {
    let given_name = name
        .and_then(|n| n.given.first())
        .cloned()
        .unwrap_or_default();
    let middle_name = name.and_then(|n| n.given.get(1)).cloned().unwrap_or_default();
    let family_name = name.map(|n| n.family.clone()).unwrap_or_default();

    RegistryName {
        display: format!("{} {}", given_name, family_name),
        given_name,
        middle_name,
        family_name,
        preferred: true,
    }
}

fn registry_address(address: Option<&ClinicalAddress>) -> RegistryAddress {
    match address {
        Some(a) => RegistryAddress {
            address1: a.line.first().cloned().unwrap_or_default(),
            address2: a.line.get(1).cloned().unwrap_or_default(),
            city_village: a.city.clone(),
            county_district: a.county.clone(),
            state_province: a.state.clone(),
            country: a.country.clone(),
            postal_code: a.postal_code.clone(),
        },
        None => RegistryAddress::default(),
    }
}
