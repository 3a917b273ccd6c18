//! # Form View
//!
//! Add/edit forms bound to a string-valued [`Draft`].
//!
//! A [`FormSchema`] describes one form: its fields, how to load a draft from
//! a stored value, extra cross-field checks, and how to write a valid draft
//! back onto a value. Field-kind checks (required, slug, URL, number, ...)
//! are shared and driven by the [`FieldSpec`] list.
//!
//! Slug fields are auto-derived from the title until the user types into
//! them. That state lives in [`DerivedField::user_overridden`].

use guardpost_core::{AdminError, AdminResult, Identifiable, RecordId, Timestamped, Titled};
use guardpost_model::{FieldErrors, Record, derive_slug, validation};
use guardpost_store::Repository;
use tracing::{debug, info};

use crate::state::{AdminContext, Navigation, Notification, Route};

/// Allowed values of every status field
pub const STATUS_OPTIONS: &[&str] = &["active", "inactive"];

// ============================================================================
// Field descriptions
// ============================================================================

/// Input control kind, which also selects the shared validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line plain text
    TextArea,
    /// Rich text (HTML); must have visible text when required
    RichText,
    /// URL slug
    Slug,
    /// Absolute http(s) URL
    Url,
    /// Email address
    Email,
    /// Non-negative whole number
    Integer,
    /// Non-negative decimal
    Decimal,
    /// Date (`YYYY-MM-DD` or RFC 3339)
    Date,
    /// One of a fixed set of values
    Select(&'static [&'static str]),
    /// Yes/no toggle
    Flag,
    /// Comma-separated placeholder names
    VariableList,
    /// Uploaded file reference
    File,
}

/// One input of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
    /// Initial value in add mode
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            max_length: None,
            default: "",
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn max_length(self, max: usize) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    pub const fn default_value(self, default: &'static str) -> Self {
        Self { default, ..self }
    }

    /// Check one value against this field's kind and flags
    pub fn check(&self, value: &str) -> Result<(), String> {
        let blank = value.trim().is_empty();
        if self.required {
            match self.kind {
                FieldKind::RichText => validation::rich_text(value, self.label)?,
                _ => validation::required(value, self.label)?,
            }
        }
        if let Some(max) = self.max_length {
            validation::max_length(value, max, self.label)?;
        }
        if blank {
            return Ok(());
        }

        match self.kind {
            FieldKind::Slug => validation::slug(value),
            FieldKind::Url => validation::http_url(value, self.label),
            FieldKind::Email => validation::email(value),
            FieldKind::Integer => validation::non_negative_integer(value, self.label).map(drop),
            FieldKind::Decimal => validation::non_negative_decimal(value, self.label).map(drop),
            FieldKind::Date => validation::optional_date(value, self.label).map(drop),
            FieldKind::Flag => validation::flag(value, self.label).map(drop),
            FieldKind::VariableList => validation::variable_list(value).map(drop),
            FieldKind::Select(options) => {
                if options.contains(&value.trim()) {
                    Ok(())
                } else {
                    Err(format!("{} must be one of {}", self.label, options.join(", ")))
                }
            }
            FieldKind::Text | FieldKind::TextArea | FieldKind::RichText | FieldKind::File => Ok(()),
        }
    }
}

// ============================================================================
// Draft
// ============================================================================

/// String values of every field of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    fields: &'static [FieldSpec],
    values: Vec<String>,
}

impl Draft {
    /// A draft holding each field's default value
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            values: fields.iter().map(|f| f.default.to_string()).collect(),
        }
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == field)
    }

    /// Value of a field (empty for unknown fields)
    pub fn get(&self, field: &str) -> &str {
        self.position(field)
            .map(|i| self.values[i].as_str())
            .unwrap_or("")
    }

    /// Trimmed value, `None` when blank
    pub fn optional(&self, field: &str) -> Option<String> {
        let value = self.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Set a field's value; returns false for unknown fields
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.position(field) {
            Some(i) => {
                self.values[i] = value.into();
                true
            }
            None => false,
        }
    }

    /// Whether the form has a field with this name
    pub fn has_field(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    /// `(spec, value)` pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldSpec, &str)> {
        self.fields.iter().zip(self.values.iter().map(String::as_str))
    }

    /// Run every field's shared check
    pub fn check_fields(&self, errors: &mut FieldErrors) {
        for (spec, value) in self.iter() {
            errors.check(spec.name, spec.check(value));
        }
    }
}

/// Map a rule result onto a field error of a form
pub(crate) fn parsed<T>(form: &str, field: &str, result: Result<T, String>) -> AdminResult<T> {
    result.map_err(|message| AdminError::field_validation(form, field, message))
}

// ============================================================================
// Derived fields
// ============================================================================

/// A field whose value follows another field until the user overrides it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedField {
    pub value: String,
    /// Set once the user has typed a value of their own
    pub user_overridden: bool,
}

impl DerivedField {
    /// Load an existing value; a non-empty value counts as user-chosen
    pub fn loaded(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            user_overridden: !value.is_empty(),
            value,
        }
    }

    /// Follow the source field unless overridden
    pub fn derive_from(&mut self, source: &str) {
        if !self.user_overridden {
            self.value = derive_slug(source);
        }
    }

    /// Take a value typed by the user; clearing it resumes derivation
    pub fn set_manual(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.user_overridden = !self.value.is_empty();
    }
}

/// Names a slug field and the field it is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugBinding {
    pub source: &'static str,
    pub target: &'static str,
}

// ============================================================================
// FormSchema
// ============================================================================

/// Description of one form
pub trait FormSchema: 'static {
    /// Value the form loads from and writes to
    type Target: Clone;

    /// Form name used in errors and logs
    const FORM: &'static str;

    const FIELDS: &'static [FieldSpec];

    /// Slug field auto-derived from a title field, if any
    const SLUG: Option<SlugBinding> = None;

    /// Starting value for add mode
    fn blank() -> Self::Target;

    /// Fill a draft from a stored value
    fn load(target: &Self::Target, draft: &mut Draft);

    /// Cross-field checks beyond the per-field rules
    fn check(_draft: &Draft, _errors: &mut FieldErrors) {}

    /// Write a checked draft onto `target`
    fn apply(draft: &Draft, target: &mut Self::Target) -> AdminResult<()>;
}

// ============================================================================
// FormState
// ============================================================================

/// Draft, derived slug and field errors shared by every form view
#[derive(Debug, Clone)]
pub struct FormState<F: FormSchema> {
    draft: Draft,
    slug: Option<DerivedField>,
    errors: FieldErrors,
    _schema: std::marker::PhantomData<fn() -> F>,
}

impl<F: FormSchema> FormState<F> {
    /// Empty state for add mode
    pub fn blank() -> Self {
        let mut draft = Draft::new(F::FIELDS);
        F::load(&F::blank(), &mut draft);
        Self::from_draft(draft)
    }

    /// State loaded from a stored value
    pub fn loaded(target: &F::Target) -> Self {
        let mut draft = Draft::new(F::FIELDS);
        F::load(target, &mut draft);
        Self::from_draft(draft)
    }

    fn from_draft(draft: Draft) -> Self {
        let slug = F::SLUG.map(|b| DerivedField::loaded(draft.get(b.target)));
        Self {
            draft,
            slug,
            errors: FieldErrors::new(),
            _schema: std::marker::PhantomData,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn value(&self, field: &str) -> &str {
        self.draft.get(field)
    }

    /// The derived slug state, for forms that have one
    pub fn slug(&self) -> Option<&DerivedField> {
        self.slug.as_ref()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Edit one field, clearing only that field's error
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> AdminResult<()> {
        let value = value.into();
        if !self.draft.set(field, value.clone()) {
            return Err(AdminError::unknown_field(F::FORM, field));
        }
        self.errors.clear_field(field);

        if let (Some(binding), Some(slug)) = (F::SLUG, self.slug.as_mut()) {
            if field == binding.target {
                slug.set_manual(value);
            } else if field == binding.source {
                slug.derive_from(&value);
                let derived = slug.value.clone();
                self.draft.set(binding.target, derived);
            }
        }
        Ok(())
    }

    /// Derive an empty slug from the title (without marking it overridden)
    fn fill_empty_slug(&mut self) {
        if let (Some(binding), Some(slug)) = (F::SLUG, self.slug.as_mut()) {
            if slug.value.trim().is_empty() {
                slug.value = derive_slug(self.draft.get(binding.source));
                slug.user_overridden = false;
                let derived = slug.value.clone();
                self.draft.set(binding.target, derived);
            }
        }
    }

    /// Run every check, replacing the stored errors
    pub fn validate(&mut self) -> bool {
        self.fill_empty_slug();
        let mut errors = FieldErrors::new();
        self.draft.check_fields(&mut errors);
        F::check(&self.draft, &mut errors);
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Add an error found outside the schema (e.g. a slug clash)
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Fail with `FormInvalid` when errors are present
    pub fn ensure_valid(&self) -> AdminResult<()> {
        self.errors.clone().into_result(F::FORM)
    }

    /// Write the draft onto `target`
    pub fn apply_to(&self, target: &mut F::Target) -> AdminResult<()> {
        F::apply(&self.draft, target)
    }
}

// ============================================================================
// FormView
// ============================================================================

/// Whether the form creates or edits a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(RecordId),
}

/// Add/edit form over one record collection
#[derive(Debug, Clone)]
pub struct FormView<F>
where
    F: FormSchema,
    F::Target: Record,
{
    ctx: AdminContext,
    repo: Repository<F::Target>,
    mode: FormMode,
    state: FormState<F>,
    original: Option<F::Target>,
}

impl<F> FormView<F>
where
    F: FormSchema,
    F::Target: Record,
{
    /// Open an empty add form
    pub fn add(ctx: AdminContext) -> Self {
        let repo = ctx.store.collection::<F::Target>();
        Self {
            ctx,
            repo,
            mode: FormMode::Add,
            state: FormState::blank(),
            original: None,
        }
    }

    /// Open an edit form on an existing record
    pub fn edit(ctx: AdminContext, id: &RecordId) -> AdminResult<Self> {
        let repo = ctx.store.collection::<F::Target>();
        let record = repo.get(id)?;
        debug!("Editing {} {}", F::FORM, id);
        Ok(Self {
            ctx,
            repo,
            mode: FormMode::Edit(id.clone()),
            state: FormState::loaded(&record),
            original: Some(record),
        })
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Route this form lives at
    pub fn route(&self) -> Route {
        let key = <F::Target as Record>::KEY;
        match &self.mode {
            FormMode::Add => Route::Add(key),
            FormMode::Edit(id) => Route::Edit(key, id.clone()),
        }
    }

    /// The record being edited, as loaded
    pub fn original(&self) -> Option<&F::Target> {
        self.original.as_ref()
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        F::FIELDS
    }

    pub fn state(&self) -> &FormState<F> {
        &self.state
    }

    pub fn value(&self, field: &str) -> &str {
        self.state.value(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> AdminResult<()> {
        self.state.set(field, value)
    }

    pub fn slug(&self) -> Option<&DerivedField> {
        self.state.slug()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.state.error_for(field)
    }

    /// Run every check, including slug uniqueness within the collection
    pub fn validate(&mut self) -> bool {
        let mut valid = self.state.validate();
        if let Some(binding) = F::SLUG {
            let slug = self.state.value(binding.target).to_string();
            let except = match &self.mode {
                FormMode::Edit(id) => Some(id),
                FormMode::Add => None,
            };
            if !self.state.errors().contains(binding.target)
                && self.repo.slug_taken(&slug, except)
            {
                self.state
                    .add_error(binding.target, format!("Slug '{}' is already in use", slug));
                valid = false;
            }
        }
        valid
    }

    /// Validate, then create or update the record
    ///
    /// Nothing is written when validation fails; the errors stay on the form.
    pub async fn submit(&mut self) -> AdminResult<Navigation> {
        if !self.validate() {
            debug!("{} form has {} error(s)", F::FORM, self.errors().len());
            self.state.ensure_valid()?;
        }

        let key = <F::Target as Record>::KEY;
        let mut record = self.original.clone().unwrap_or_else(F::blank);
        self.state.apply_to(&mut record)?;

        self.ctx.simulate_latency().await;

        let verb = match &self.mode {
            FormMode::Add => {
                self.repo.insert(record.clone())?;
                "created"
            }
            FormMode::Edit(_) => {
                record.touch();
                self.repo.replace(record.clone())?;
                "updated"
            }
        };
        info!("{} {} {}", key.singular_name(), record.id(), verb);

        Ok(Navigation::to(Route::List(key)).with_notification(Notification::success(
            format!("{} '{}' {}", key.singular_name(), record.title(), verb),
        )))
    }

    /// Leave the form without saving
    pub fn cancel(&self) -> Navigation {
        Navigation::to(Route::List(<F::Target as Record>::KEY))
    }
}

// ============================================================================
// Tests
// ============================================================================
