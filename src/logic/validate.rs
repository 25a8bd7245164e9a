use chrono::{Months, NaiveDate};

use crate::error::BackendError;
use crate::model::{HorseUpdate, Id, Lineage, OwnerCreate, Sex};

const MAX_NAME_LENGTH: usize = 255;
const MAX_DESCRIPTION_LENGTH: usize = 4095;
const MAX_AGE_YEARS: u32 = 62;

/// Deepest pedigree the backend builds.
pub const MAX_PEDIGREE_GENERATIONS: u32 = MAX_AGE_YEARS;

/// What the validator needs to know about the records already stored.
pub trait RegistryView {
    /// Sex and date of birth of a stored horse
    fn horse_profile(&self, id: Id) -> Option<(Sex, NaiveDate)>;
    fn owner_exists(&self, id: Id) -> bool;
    /// Name, date of birth and parent role of every horse that lists `id`
    /// as mother or father
    fn offspring(&self, id: Id) -> Vec<(String, NaiveDate, Lineage)>;
}

pub struct HorseValidator;

impl HorseValidator {
    /// Validate a horse payload. `id` is the horse being updated, `None`
    /// for a create.
    pub fn validate<R: RegistryView>(
        registry: &R,
        id: Option<Id>,
        horse: &HorseUpdate,
        today: NaiveDate,
    ) -> Result<(), BackendError> {
        let mut errors = Vec::new();

        Self::check_name(&horse.name, &mut errors);

        if let Some(description) = &horse.description {
            if description.trim().is_empty() {
                errors.push("Horse description is given but blank".to_string());
            }
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                errors.push(format!(
                    "Horse description too long: longer than {} characters",
                    MAX_DESCRIPTION_LENGTH
                ));
            }
        }

        if horse.date_of_birth > today {
            errors.push("Horse date of birth cannot be in the future".to_string());
        }
        if let Some(oldest) = today.checked_sub_months(Months::new(12 * MAX_AGE_YEARS)) {
            if horse.date_of_birth < oldest {
                errors.push(format!(
                    "Horse date of birth indicates an age over {} years, which is not possible",
                    MAX_AGE_YEARS
                ));
            }
        }

        Self::check_parent(registry, id, horse, "mother", horse.mother_id, Sex::Female, &mut errors);
        Self::check_parent(registry, id, horse, "father", horse.father_id, Sex::Male, &mut errors);
        if let Some(id) = id {
            Self::check_offspring(registry, id, horse, &mut errors);
        }

        if let Some(owner_id) = horse.owner_id {
            if !registry.owner_exists(owner_id) {
                errors.push(format!("Owner with ID {} not found", owner_id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            let action = if id.is_some() { "update" } else { "create" };
            Err(BackendError::validation(
                format!("Validation of horse for {} failed", action),
                errors,
            ))
        }
    }

    fn check_name(name: &str, errors: &mut Vec<String>) {
        if name.trim().is_empty() {
            errors.push("Horse name is required".to_string());
            return;
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(format!(
                "Horse name too long: longer than {} characters",
                MAX_NAME_LENGTH
            ));
        }
        let mut chars = name.chars();
        let well_formed = chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_alphabetic() || c == '-');
        if !well_formed {
            errors.push(
                "Horse name must start with a capital letter and contain only letters and hyphens"
                    .to_string(),
            );
        }
    }

    fn check_parent<R: RegistryView>(
        registry: &R,
        id: Option<Id>,
        horse: &HorseUpdate,
        role: &str,
        parent_id: Option<Id>,
        expected: Sex,
        errors: &mut Vec<String>,
    ) {
        let Some(parent_id) = parent_id else {
            return;
        };
        if id == Some(parent_id) {
            errors.push(format!("A horse cannot be its own {}", role));
            return;
        }
        match registry.horse_profile(parent_id) {
            Some((sex, born)) => {
                if born >= horse.date_of_birth {
                    errors.push(format!(
                        "The {}'s date of birth must be before the horse's date of birth",
                        role
                    ));
                }
                if sex != expected {
                    errors.push(format!(
                        "The {} must be {}",
                        role,
                        expected.label().to_lowercase()
                    ));
                }
            }
            None => errors.push(format!("The {} with ID {} was not found", role, parent_id)),
        }
    }
}

impl HorseValidator {
    /// Reject a pedigree depth the backend does not build.
    pub fn validate_pedigree_generations(generations: u32) -> Result<(), BackendError> {
        if generations <= MAX_PEDIGREE_GENERATIONS {
            return Ok(());
        }
        Err(BackendError::validation(
            "Validation of pedigree request failed",
            vec![format!(
                "Max generations must not exceed {}, got {}",
                MAX_PEDIGREE_GENERATIONS, generations
            )],
        ))
    }

    /// Every stored parent link into the horse must stay date-ordered, so no
    /// update can turn an offspring into an ancestor.
    fn check_offspring<R: RegistryView>(
        registry: &R,
        id: Id,
        horse: &HorseUpdate,
        errors: &mut Vec<String>,
    ) {
        for (name, born, role) in registry.offspring(id) {
            if born <= horse.date_of_birth {
                errors.push(format!(
                    "The horse's date of birth must be before that of its offspring {}",
                    name
                ));
            }
            let (role, expected) = match role {
                Lineage::Mother => ("mother", Sex::Female),
                Lineage::Father => ("father", Sex::Male),
            };
            if horse.sex != expected {
                errors.push(format!(
                    "The horse is recorded as {} of {} and must stay {}",
                    role,
                    name,
                    expected.label().to_lowercase()
                ));
            }
        }
    }
}

pub struct OwnerValidator;

impl OwnerValidator {
    pub fn validate(owner: &OwnerCreate) -> Result<(), BackendError> {
        let mut errors = Vec::new();
        for (field, value) in [("first name", &owner.first_name), ("last name", &owner.last_name)] {
            if value.trim().is_empty() {
                errors.push(format!("Owner {} is required", field));
            } else if value.chars().count() > MAX_NAME_LENGTH {
                errors.push(format!(
                    "Owner {} too long: longer than {} characters",
                    field, MAX_NAME_LENGTH
                ));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BackendError::validation(
                "Validation of owner for create failed",
                errors,
            ))
        }
    }
}
