// libs/appointment-cell/src/services/wizard.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use catalog_cell::{CatalogProvider, Practitioner, Procedure};
use shared_config::{AppConfig, DEFAULT_GUEST_PATIENT_ID};
use shared_utils::{Clock, IdGenerator, SystemClock, TimestampIdGenerator};

use crate::models::{
    Appointment, BookingDraft, BookingSummary, BookingValidationError, DraftField, WizardAction,
    WizardError, WizardStep,
};
use crate::services::availability::{
    is_available, normalize_time, parse_booking_date, OccupancyPolicy, OccupiedSlots, DATE_FORMAT,
};
use crate::services::dashboard::{format_display_date, practitioner_short_name};
use crate::services::lifecycle::WizardLifecycleService;
use crate::services::store::AppointmentStore;

/// Multi-step booking flow: selection, date/time, confirmation, done.
///
/// Field edits never move the wizard; only `next`, `back` and `reset` do.
/// Edits made on the confirmation step are validated again before commit.
/// The single side effect is the store append performed when `next` is
/// called on the confirmation step.
pub struct BookingWizard {
    catalog: Arc<dyn CatalogProvider>,
    store: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    occupancy: OccupancyPolicy,
    lifecycle: WizardLifecycleService,
    patient_id: String,
    step: WizardStep,
    draft: BookingDraft,
    // Draft as last accepted by the date/time gate, already canonical
    approved: Option<BookingDraft>,
    error: Option<WizardError>,
    committed: Option<Appointment>,
}

impl BookingWizard {
    /// Opens a wizard for `patient_id`, or for the guest patient when there is no session.
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        store: Arc<dyn AppointmentStore>,
        patient_id: Option<String>,
    ) -> Self {
        Self {
            catalog,
            store,
            clock: Arc::new(SystemClock),
            ids: Arc::new(TimestampIdGenerator::appointments()),
            occupancy: OccupancyPolicy::default(),
            lifecycle: WizardLifecycleService::new(),
            patient_id: patient_id.unwrap_or_else(|| DEFAULT_GUEST_PATIENT_ID.to_string()),
            step: WizardStep::SelectingProviderAndProcedure,
            draft: BookingDraft::default(),
            approved: None,
            error: None,
            committed: None,
        }
    }

    pub fn from_config(
        config: &AppConfig,
        catalog: Arc<dyn CatalogProvider>,
        store: Arc<dyn AppointmentStore>,
        patient_id: Option<&str>,
    ) -> Self {
        let patient_id = patient_id.unwrap_or(config.guest_patient_id.as_str()).to_string();
        Self::new(catalog, store, Some(patient_id)).with_occupancy(OccupancyPolicy::from_config(config))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_occupancy(mut self, occupancy: OccupancyPolicy) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// Error from the last rejected `next`, cleared by any edit or step change.
    pub fn error(&self) -> Option<&WizardError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// The appointment written by the last successful commit, until reset.
    pub fn committed(&self) -> Option<&Appointment> {
        self.committed.as_ref()
    }

    // ==============================================================================
    // FIELD EDITS
    // ==============================================================================

    pub fn set_practitioner(&mut self, practitioner_id: impl Into<String>) -> Result<(), WizardError> {
        self.edit(DraftField::Practitioner, practitioner_id.into())
    }

    pub fn set_procedure(&mut self, procedure_id: impl Into<String>) -> Result<(), WizardError> {
        self.edit(DraftField::Procedure, procedure_id.into())
    }

    pub fn set_date(&mut self, date: impl Into<String>) -> Result<(), WizardError> {
        self.edit(DraftField::Date, date.into())
    }

    pub fn set_time(&mut self, time: impl Into<String>) -> Result<(), WizardError> {
        self.edit(DraftField::Time, time.into())
    }

    pub fn edit(&mut self, field: DraftField, value: String) -> Result<(), WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::AlreadyCompleted);
        }

        debug!("Draft {} set to '{}' on step {}", field, value, self.step);
        self.draft.set(field, value);
        self.error = None;
        Ok(())
    }

    // ==============================================================================
    // TRANSITIONS
    // ==============================================================================

    /// Validates the current step and moves forward. On the confirmation step
    /// this commits the appointment.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let target = self.lifecycle.resolve(self.step, WizardAction::Next)?;
        self.error = None;

        let outcome = match self.step {
            WizardStep::SelectingProviderAndProcedure => self.check_selection(),
            WizardStep::SelectingDateTime => self.check_date_time(),
            WizardStep::Confirming => self.commit(),
            WizardStep::Completed => Ok(()),
        };

        match outcome {
            Ok(()) => {
                debug!("Wizard advanced {} -> {}", self.step, target);
                self.step = target;
                Ok(target)
            }
            Err(e) => {
                warn!("Wizard stayed on step {}: {}", self.step, e);
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let target = self.lifecycle.resolve(self.step, WizardAction::Back)?;
        self.error = None;
        self.step = target;
        Ok(target)
    }

    /// Starts over with an empty draft. Only available once a booking is completed.
    pub fn reset(&mut self) -> Result<WizardStep, WizardError> {
        let target = self.lifecycle.resolve(self.step, WizardAction::Reset)?;
        self.draft = BookingDraft::default();
        self.approved = None;
        self.error = None;
        self.committed = None;
        self.step = target;
        Ok(target)
    }

    // ==============================================================================
    // VIEWS
    // ==============================================================================

    /// Confirmation view of the draft, or of the committed appointment once completed.
    pub fn summary(&self) -> Option<BookingSummary> {
        if let Some(appointment) = &self.committed {
            return Some(BookingSummary {
                practitioner: appointment.practitioner_name.clone(),
                practitioner_short: practitioner_short_name(&appointment.practitioner_name).to_string(),
                procedure: appointment.procedure_name.clone(),
                date: appointment.date.clone(),
                display_date: format_display_date(&appointment.date),
                time: appointment.time.clone(),
            });
        }

        let practitioner = self.catalog.find_practitioner(&self.draft.practitioner_id)?;
        let procedure = self.catalog.find_procedure(&self.draft.procedure_id)?;
        Some(BookingSummary {
            practitioner: practitioner.display_name(),
            practitioner_short: practitioner.name,
            procedure: procedure.name,
            date: self.draft.date.clone(),
            display_date: format_display_date(&self.draft.date),
            time: self.draft.time.clone(),
        })
    }

    /// Times that cannot be booked for the draft's practitioner and date.
    pub fn occupied_slots(&self) -> Result<OccupiedSlots, WizardError> {
        let practitioner_name = self
            .catalog
            .find_practitioner(&self.draft.practitioner_id)
            .map(|p| p.display_name())
            .unwrap_or_default();
        let date = parse_booking_date(&self.draft.date)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|_| self.draft.date.clone());

        Ok(self
            .occupancy
            .occupied_slots(self.store.as_ref(), &date, &practitioner_name)?)
    }

    // ==============================================================================
    // STEP GUARDS
    // ==============================================================================

    fn check_selection(&self) -> Result<(), WizardError> {
        let missing = self.draft.missing_fields(WizardStep::SelectingProviderAndProcedure);
        if !missing.is_empty() {
            return Err(BookingValidationError::IncompleteSelection {
                step: WizardStep::SelectingProviderAndProcedure,
                missing,
            }
            .into());
        }

        self.resolve_practitioner()?;
        self.resolve_procedure()?;
        Ok(())
    }

    fn check_date_time(&mut self) -> Result<(), WizardError> {
        let missing = self.draft.missing_fields(WizardStep::SelectingDateTime);
        if !missing.is_empty() {
            return Err(BookingValidationError::IncompleteSelection {
                step: WizardStep::SelectingDateTime,
                missing,
            }
            .into());
        }

        let date = parse_booking_date(&self.draft.date)?;
        let today = self.clock.today();
        if date < today {
            return Err(BookingValidationError::DateInPast {
                date: date.format(DATE_FORMAT).to_string(),
                today: today.format(DATE_FORMAT).to_string(),
            }
            .into());
        }

        let time = normalize_time(&self.draft.time)?;
        let date_key = date.format(DATE_FORMAT).to_string();
        let practitioner_name = self.resolve_practitioner()?.display_name();
        let occupied = self
            .occupancy
            .occupied_slots(self.store.as_ref(), &date_key, &practitioner_name)?;

        if !is_available(date, &time, &occupied) {
            return Err(BookingValidationError::SlotUnavailable { date: date_key, time }.into());
        }

        self.draft.date = date_key;
        self.draft.time = time;
        self.approved = Some(self.draft.clone());
        Ok(())
    }

    /// Writes the draft, re-running both gates first if it was edited after approval.
    fn commit(&mut self) -> Result<(), WizardError> {
        if self.approved.as_ref() != Some(&self.draft) {
            debug!("Draft edited on confirmation, validating it again");
            self.check_selection()?;
            self.check_date_time()?;
        }

        let practitioner = self.resolve_practitioner()?;
        let procedure = self.resolve_procedure()?;

        let appointment = Appointment {
            id: self.ids.next_id(),
            patient_id: self.patient_id.clone(),
            practitioner_name: practitioner.display_name(),
            procedure_name: procedure.name,
            date: self.draft.date.clone(),
            time: self.draft.time.clone(),
            created_at: self.clock.now(),
        };

        self.store.append(appointment.clone())?;

        info!(
            "Booked appointment {} for patient {} with {} on {} at {}",
            appointment.id, appointment.patient_id, appointment.practitioner_name, appointment.date, appointment.time
        );
        self.committed = Some(appointment);
        Ok(())
    }

    fn resolve_practitioner(&self) -> Result<Practitioner, BookingValidationError> {
        self.catalog
            .find_practitioner(&self.draft.practitioner_id)
            .ok_or_else(|| BookingValidationError::UnknownPractitioner(self.draft.practitioner_id.clone()))
    }

    fn resolve_procedure(&self) -> Result<Procedure, BookingValidationError> {
        self.catalog
            .find_procedure(&self.draft.procedure_id)
            .ok_or_else(|| BookingValidationError::UnknownProcedure(self.draft.procedure_id.clone()))
    }
}
