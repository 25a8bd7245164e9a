use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};

use crate::error::HorseFormError;
use crate::logic::{format_error, RelationshipAssigner, RelationshipSuggester};
use crate::model::{Candidate, Horse, HorseCreate, HorseUpdate, Id, RelationshipRole, Sex};
use crate::store::traits::Backend;
use crate::view::capabilities::{Navigator, NotifyOptions, Notifier};
use crate::view::relationship_field::RelationshipField;

/// Which screen the horse form is showing. Only the modes that address a
/// stored horse carry its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorseFormMode {
    Create,
    Edit { id: Id },
    Detail { id: Id },
}

impl HorseFormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            HorseFormMode::Create => "Create New Horse",
            HorseFormMode::Edit { .. } => "Edit Horse",
            HorseFormMode::Detail { .. } => "View Horse",
        }
    }

    /// Label of the submit button; the detail screen has none
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            HorseFormMode::Create => Some("Create"),
            HorseFormMode::Edit { .. } => Some("Save Changes"),
            HorseFormMode::Detail { .. } => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        match self {
            HorseFormMode::Create | HorseFormMode::Edit { .. } => false,
            HorseFormMode::Detail { .. } => true,
        }
    }

    fn finished_verb(&self) -> Option<&'static str> {
        match self {
            HorseFormMode::Create => Some("created"),
            HorseFormMode::Edit { .. } => Some("updated"),
            HorseFormMode::Detail { .. } => None,
        }
    }

    fn failure_title(&self) -> &'static str {
        match self {
            HorseFormMode::Create => "Could Not Create Horse",
            HorseFormMode::Edit { .. } | HorseFormMode::Detail { .. } => "Could Not Save Horse",
        }
    }

    pub fn horse_id(&self) -> Option<Id> {
        match self {
            HorseFormMode::Create => None,
            HorseFormMode::Edit { id } | HorseFormMode::Detail { id } => Some(*id),
        }
    }

    fn assigner(&self) -> RelationshipAssigner {
        match self.horse_id() {
            Some(id) => RelationshipAssigner::for_horse(id),
            None => RelationshipAssigner::for_new(),
        }
    }
}

/// Plain fields of the form; relationships live in their pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HorseDraft {
    pub name: String,
    pub description: String,
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Option<Sex>,
}

/// Create, edit and detail screen of a single horse.
pub struct HorseForm<B, N, R> {
    mode: HorseFormMode,
    backend: Arc<B>,
    notifier: N,
    navigator: R,
    draft: HorseDraft,
    mother: RelationshipField<B>,
    father: RelationshipField<B>,
    owner: RelationshipField<B>,
}

impl<B, N, R> HorseForm<B, N, R>
where
    B: Backend,
    N: Notifier,
    R: Navigator,
{
    pub fn new(mode: HorseFormMode, backend: Arc<B>, notifier: N, navigator: R) -> Self {
        let suggester = RelationshipSuggester::new(Arc::clone(&backend));
        Self {
            mode,
            mother: RelationshipField::new(RelationshipRole::Mother, suggester.clone()),
            father: RelationshipField::new(RelationshipRole::Father, suggester.clone()),
            owner: RelationshipField::new(RelationshipRole::Owner, suggester),
            backend,
            notifier,
            navigator,
            draft: HorseDraft::default(),
        }
    }

    pub fn mode(&self) -> HorseFormMode {
        self.mode
    }

    pub fn draft(&self) -> &HorseDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut HorseDraft {
        &mut self.draft
    }

    pub fn field(&self, role: RelationshipRole) -> &RelationshipField<B> {
        match role {
            RelationshipRole::Mother => &self.mother,
            RelationshipRole::Father => &self.father,
            RelationshipRole::Owner => &self.owner,
        }
    }

    /// Fill the form from the stored horse. A create form has nothing to
    /// load and returns `true`.
    pub async fn load(&mut self) -> bool {
        let Some(id) = self.mode.horse_id() else {
            return true;
        };
        match self.backend.get_horse(id).await {
            Ok(horse) => {
                self.fill(horse);
                true
            }
            Err(err) => {
                warn!("Loading horse {} failed: {}", id, err);
                self.notifier.notify(
                    &format_error(&err),
                    "Failed to load horse data",
                    NotifyOptions::detailed_error(),
                );
                false
            }
        }
    }

    fn fill(&mut self, horse: Horse) {
        self.draft = HorseDraft {
            name: horse.name,
            description: horse.description.unwrap_or_default(),
            date_of_birth: Some(horse.date_of_birth),
            sex: Some(horse.sex),
        };
        self.mother.set_selection(horse.mother.map(Candidate::from));
        self.father.set_selection(horse.father.map(Candidate::from));
        self.owner.set_selection(horse.owner.map(Candidate::from));
    }

    /// Payload for the current mode: ids only, an empty description is
    /// left out.
    pub fn payload(&self) -> Result<HorseUpdate, HorseFormError> {
        if self.mode.is_read_only() {
            return Err(HorseFormError::ReadOnly);
        }
        let name = self.draft.name.trim();
        if name.is_empty() {
            return Err(HorseFormError::MissingField("Name"));
        }
        let date_of_birth = self
            .draft
            .date_of_birth
            .ok_or(HorseFormError::MissingField("Date of birth"))?;
        let sex = self.draft.sex.ok_or(HorseFormError::MissingField("Sex"))?;

        let assigner = self.mode.assigner();
        let pick = |field: &RelationshipField<B>| {
            assigner.assign(field.role(), field.selection().as_ref())
        };
        let description = self.draft.description.trim();

        Ok(HorseUpdate {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            date_of_birth,
            sex,
            owner_id: pick(&self.owner)?,
            mother_id: pick(&self.mother)?,
            father_id: pick(&self.father)?,
        })
    }

    /// Send the form. On success the user is told and taken back to the
    /// horse list; returns whether the backend accepted it.
    pub async fn submit(&mut self) -> bool {
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.notifier
                    .notify(&err.to_string(), self.mode.failure_title(), NotifyOptions::error());
                return false;
            }
        };

        let result = match self.mode {
            HorseFormMode::Create => {
                let create = HorseCreate {
                    name: payload.name,
                    description: payload.description,
                    date_of_birth: payload.date_of_birth,
                    sex: payload.sex,
                    owner_id: payload.owner_id,
                    mother_id: payload.mother_id,
                    father_id: payload.father_id,
                };
                self.backend.create_horse(&create).await
            }
            HorseFormMode::Edit { id } => self.backend.update_horse(id, &payload).await,
            HorseFormMode::Detail { .. } => return false,
        };

        match result {
            Ok(horse) => {
                let verb = self.mode.finished_verb().unwrap_or_default();
                info!("Horse {} {}", horse.id, verb);
                self.notifier.notify(
                    &format!("Horse {} successfully {}.", horse.name, verb),
                    "",
                    NotifyOptions::success(),
                );
                self.navigator.navigate_to("/horses", &[]);
                true
            }
            Err(err) => {
                warn!("Saving horse failed: {}", err);
                self.notifier.notify(
                    &format_error(&err),
                    self.mode.failure_title(),
                    NotifyOptions::detailed_error(),
                );
                false
            }
        }
    }

    /// Delete the stored horse and return to the horse list.
    pub async fn delete(&mut self) -> bool {
        let Some(id) = self.mode.horse_id() else {
            return false;
        };
        match self.backend.delete_horse(id).await {
            Ok(()) => {
                self.notifier.notify(
                    &format!("Deleting horse {}.", self.draft.name),
                    "",
                    NotifyOptions::success(),
                );
                self.navigator.navigate_to("/horses", &[]);
                true
            }
            Err(err) => {
                self.notifier.notify(
                    &format_error(&err),
                    "Could Not Delete Horse",
                    NotifyOptions::detailed_error(),
                );
                false
            }
        }
    }

    /// Open the pedigree of the stored horse. The generation limit is only
    /// passed on when one was typed in.
    pub fn go_to_pedigree(&self, max_generations: &str) {
        let Some(id) = self.mode.horse_id() else {
            return;
        };
        let path = format!("/horses/pedigree/{}", id);
        let value = max_generations.trim();
        if value.is_empty() {
            self.navigator.navigate_to(&path, &[]);
        } else {
            self.navigator
                .navigate_to(&path, &[("maxGenerations".to_string(), value.to_string())]);
        }
    }
}
