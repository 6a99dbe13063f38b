use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Closed set of person-attribute kinds the registry accepts.
///
/// Every attribute the forward mapper emits references one of these;
/// nothing outside the set ever reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    PhoneNumber,
    EmailAddress,
    NationalId,
    SecondFamilyName,
    BiologicalSex,
    Nationality,
}

/// Attribute-type identifiers of one registry deployment, keyed by kind.
#[derive(Debug, Clone)]
pub struct AttributeTypeTable {
    pub phone_number: Uuid,
    pub email_address: Uuid,
    pub national_id: Uuid,
    pub second_family_name: Uuid,
    pub biological_sex: Uuid,
    pub nationality: Uuid,
}

impl AttributeTypeTable {
    pub fn get(&self, kind: AttributeKind) -> Uuid {
        match kind {
            AttributeKind::PhoneNumber => self.phone_number,
            AttributeKind::EmailAddress => self.email_address,
            AttributeKind::NationalId => self.national_id,
            AttributeKind::SecondFamilyName => self.second_family_name,
            AttributeKind::BiologicalSex => self.biological_sex,
            AttributeKind::Nationality => self.nationality,
        }
    }
}

/// Biological-sex codes understood by the coded-value lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiologicalSex {
    Male,
    Female,
    Other,
    Unknown,
}

impl BiologicalSex {
    /// Resolves a coding code against the closed lookup. Codes outside the
    /// set yield `None` and the caller drops the attribute.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            "Unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Registry concept identifiers the biological-sex codes resolve to.
#[derive(Debug, Clone)]
pub struct SexConceptTable {
    pub male: Uuid,
    pub female: Uuid,
    pub other: Uuid,
    pub unknown: Uuid,
}

impl SexConceptTable {
    pub fn get(&self, sex: BiologicalSex) -> Uuid {
        match sex {
            BiologicalSex::Male => self.male,
            BiologicalSex::Female => self.female,
            BiologicalSex::Other => self.other,
            BiologicalSex::Unknown => self.unknown,
        }
    }
}

/// Administrative gender as the clinical side spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unknown,
}

impl Gender {
    /// Maps a single-letter registry code, case-insensitively. Anything
    /// outside `m`/`f`/`o` (including an empty code) is `unknown`.
    pub fn from_registry_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "m" => Self::Male,
            "f" => Self::Female,
            "o" => Self::Other,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

/// Single-letter gender code on the registry side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryGender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl RegistryGender {
    /// Lower-cases the clinical gender and maps it. Anything outside the
    /// three known values (including an absent gender) collapses to `O`.
    pub fn from_clinical(gender: &str) -> Self {
        match gender.to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

/// Fixed deployment catalog injected into both mappers at construction.
///
/// Everything environment-specific lives here: the attribute-type and
/// sex-concept tables, the extension and identifier system URIs, and the
/// placeholder identifier block the registry expects on profile creation.
/// Substituting a different deployment's catalog requires no code changes.
#[derive(Debug, Clone)]
pub struct MapperCatalog {
    pub attribute_types: AttributeTypeTable,
    pub sex_concepts: SexConceptTable,
    /// Name-level extension URI carrying the second family name.
    pub second_family_name_url: String,
    /// Top-level extension URI carrying the coded biological sex.
    pub biological_sex_url: String,
    /// Top-level extension URI carrying the coded nationality.
    pub nationality_url: String,
    /// Identifier system URI marking the national identifier.
    pub national_id_system: String,
    /// System URI attached to identifiers extracted from registry profiles.
    pub main_identifier_system: String,
    pub identifier_source: Uuid,
    pub identifier_prefix: String,
    pub identifier_type: Uuid,
}

impl Default for MapperCatalog {
    fn default() -> Self {
        Self {
            attribute_types: AttributeTypeTable {
                phone_number: uuid!("a384873b-847a-4a86-b869-28fb601162dd"),
                email_address: uuid!("e3123cba-5e07-11ef-8f7c-0242ac120002"),
                national_id: uuid!("9c50f6db-e624-4aa6-9454-d8b1d49b2bf3"),
                second_family_name: uuid!("e628c57c-8077-422a-a016-2b295998cf36"),
                biological_sex: uuid!("7c8d50bd-73d0-40ef-8f9a-12057b61286e"),
                nationality: uuid!("7bb331e1-968f-4e26-96c5-cc9eb55fba11"),
            },
            sex_concepts: SexConceptTable {
                male: uuid!("3aa39e38-06e4-4c03-8aad-47007256077f"),
                female: uuid!("61b70ab0-f6fe-4aa8-b36f-67d2f4fd4c92"),
                other: uuid!("0fd08f92-8dda-49b5-9fcb-76d0f21b309b"),
                unknown: uuid!("a6f9792f-7725-448b-9ff3-22945ecbbce8"),
            },
            second_family_name_url:
                "https://hl7chile.cl/fhir/ig/clcore/StructureDefinition/SegundoApellido".to_string(),
            biological_sex_url:
                "https://hl7chile.cl/fhir/ig/clcore/StructureDefinition/SexoBiologico".to_string(),
            nationality_url:
                "https://hl7chile.cl/fhir/ig/clcore/StructureDefinition/Nacionalidad".to_string(),
            national_id_system:
                "https://hl7chile.cl/fhir/ig/clcore/CodeSystem/CSIdentificadoresCL".to_string(),
            main_identifier_system: "http://bahmni.org/main-identifier".to_string(),
            identifier_source: uuid!("c5cf4b68-6529-43fc-a644-c775ae73745e"),
            identifier_prefix: "ABC".to_string(),
            identifier_type: uuid!("d3153eb0-5e07-11ef-8f7c-0242ac120002"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_gender_from_clinical_is_case_insensitive_and_total() {
        assert_eq!(RegistryGender::from_clinical("Male"), RegistryGender::Male);
        assert_eq!(RegistryGender::from_clinical("FEMALE"), RegistryGender::Female);
        assert_eq!(RegistryGender::from_clinical("other"), RegistryGender::Other);
        assert_eq!(RegistryGender::from_clinical("nonbinary"), RegistryGender::Other);
        assert_eq!(RegistryGender::from_clinical(""), RegistryGender::Other);
    }

    #[test]
    fn gender_from_registry_code_falls_back_to_unknown() {
        assert_eq!(Gender::from_registry_code("M"), Gender::Male);
        assert_eq!(Gender::from_registry_code("f"), Gender::Female);
        assert_eq!(Gender::from_registry_code("o"), Gender::Other);
        assert_eq!(Gender::from_registry_code("x"), Gender::Unknown);
        assert_eq!(Gender::from_registry_code(""), Gender::Unknown);
    }

    #[test]
    fn sex_lookup_is_closed() {
        assert_eq!(BiologicalSex::from_code("Male"), Some(BiologicalSex::Male));
        assert_eq!(BiologicalSex::from_code("Unknown"), Some(BiologicalSex::Unknown));
        // Lookup is exact: the wire code table is capitalised.
        assert_eq!(BiologicalSex::from_code("male"), None);
        assert_eq!(BiologicalSex::from_code("Intersex"), None);
    }

    #[test]
    fn serialized_gender_codes_match_the_wire() {
        assert_eq!(serde_json::to_value(RegistryGender::Female).unwrap(), "F");
        assert_eq!(serde_json::to_value(Gender::Unknown).unwrap(), "unknown");
    }
}
