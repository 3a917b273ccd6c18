//! Command implementations
//!
//! Every command builds the view it needs over the shared context, feeds it
//! the command-line input and prints the result.

use anyhow::{Context, Result};
use chrono::Utc;
use guardpost_core::{AdminError, CollectionKey, RecordId, SortDirection};
use guardpost_model::{FieldErrors, Record};
use guardpost_views::{
    AdminContext, AppState, BannerForm, Dashboard, FormSchema, FormView, ListView, Navigation,
    PageForm, Route, ServiceForm, SettingsView, TemplateForm,
};
use tracing::info;

use crate::args::{Command, ListArgs};
use crate::render;

/// Errors reported by the command layer itself
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0} is not a listable collection; use `guardpost settings`")]
    NotListable(CollectionKey),

    #[error("{form} form has {count} invalid field(s):\n{details}")]
    FormRejected {
        form: &'static str,
        count: usize,
        details: String,
    },

    #[error("Nothing to change: pass at least one --set FIELD=VALUE")]
    NoChanges,

    #[error("Unknown reset target '{0}': use a collection name or `all`")]
    UnknownResetTarget(String),
}

/// Run `body` with the form schema of a listable collection
macro_rules! with_form {
    ($key:expr, $form:ident => $body:expr) => {
        match $key {
            CollectionKey::Pages => {
                type $form = PageForm;
                $body
            }
            CollectionKey::Banners => {
                type $form = BannerForm;
                $body
            }
            CollectionKey::Templates => {
                type $form = TemplateForm;
                $body
            }
            CollectionKey::Services => {
                type $form = ServiceForm;
                $body
            }
            CollectionKey::Settings => Err(CliError::NotListable(CollectionKey::Settings).into()),
        }
    };
}

/// Execute one command
pub async fn execute(ctx: AdminContext, command: Command) -> Result<()> {
    match command {
        Command::List(args) => with_form!(args.collection, F => list::<F>(ctx, &args)),
        Command::Show { collection, id } => {
            with_form!(collection, F => show::<F>(ctx, &RecordId::new(id)))
        }
        Command::Add { collection, values } => {
            with_form!(collection, F => add::<F>(ctx, &values).await)
        }
        Command::Edit {
            collection,
            id,
            values,
        } => with_form!(collection, F => edit::<F>(ctx, &RecordId::new(id), &values).await),
        Command::Delete { collection, id } => {
            with_form!(collection, F => delete::<F>(ctx, &RecordId::new(id)).await)
        }
        Command::Settings { values } => settings(ctx, &values).await,
        Command::Dashboard => dashboard(&ctx),
        Command::Reset { target } => reset(&ctx, &target),
    }
}

fn announce(navigation: &Navigation) {
    if let Some(n) = &navigation.notification {
        println!("{}", render::notification(n));
    }
}

/// Turn a rejected submit into a readable error
fn rejected<F: FormSchema>(error: AdminError, errors: &FieldErrors) -> anyhow::Error {
    match error {
        AdminError::FormInvalid { count, .. } => CliError::FormRejected {
            form: F::FORM,
            count,
            details: render::field_errors(errors),
        }
        .into(),
        other => other.into(),
    }
}

fn list<F>(ctx: AdminContext, args: &ListArgs) -> Result<()>
where
    F: FormSchema,
    F::Target: Record,
{
    let mut view = ListView::<F::Target>::new(ctx);

    if let Some(size) = args.page_size {
        view.set_page_size(size)?;
    }
    if let Some(term) = &args.search {
        view.set_search(term.as_str());
    }
    for (field, value) in &args.filter {
        view.set_filter(field, Some(value))?;
    }
    match (args.sort, args.desc) {
        (Some(field), desc) => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            view.sort_by(field, direction);
        }
        (None, true) => {
            let field = view.query().sort_field;
            view.sort_by(field, SortDirection::Descending);
        }
        (None, false) => {}
    }
    view.go_to_page(args.page);

    print!("{}", render::list(&view));
    Ok(())
}

fn show<F>(ctx: AdminContext, id: &RecordId) -> Result<()>
where
    F: FormSchema,
    F::Target: Record,
{
    let record = ctx
        .store
        .collection::<F::Target>()
        .get(id)
        .with_context(|| format!("Cannot show {}", <F::Target as Record>::KEY))?;
    print!("{}", render::record::<F>(&record));
    Ok(())
}

async fn add<F>(ctx: AdminContext, values: &[(String, String)]) -> Result<()>
where
    F: FormSchema,
    F::Target: Record,
{
    let mut view = FormView::<F>::add(ctx);
    for (field, value) in values {
        view.set(field, value.as_str())?;
    }
    let submitted = view.submit().await;
    let navigation = submitted.map_err(|e| rejected::<F>(e, view.errors()))?;
    announce(&navigation);
    Ok(())
}

async fn edit<F>(ctx: AdminContext, id: &RecordId, values: &[(String, String)]) -> Result<()>
where
    F: FormSchema,
    F::Target: Record,
{
    if values.is_empty() {
        return Err(CliError::NoChanges.into());
    }
    let mut view = match FormView::<F>::edit(ctx.clone(), id) {
        Ok(view) => view,
        Err(error) => {
            redirect_after_error::<F::Target>(ctx, id, &error);
            return Err(error.into());
        }
    };
    for (field, value) in values {
        view.set(field, value.as_str())?;
    }
    let submitted = view.submit().await;
    let navigation = submitted.map_err(|e| rejected::<F>(e, view.errors()))?;
    announce(&navigation);
    Ok(())
}

/// Report a failed edit and show the list the edit redirects to
fn redirect_after_error<R: Record>(ctx: AdminContext, id: &RecordId, error: &AdminError) {
    let mut state = AppState::new();
    state.navigate(Route::Edit(R::KEY, id.clone()));
    state.handle_error(error);
    for n in state.take_notifications() {
        println!("{}", render::notification(&n));
    }
    if state.route() == &Route::List(R::KEY) {
        print!("{}", render::list(&ListView::<R>::new(ctx)));
    }
}

async fn delete<F>(ctx: AdminContext, id: &RecordId) -> Result<()>
where
    F: FormSchema,
    F::Target: Record,
{
    let mut view = ListView::<F::Target>::new(ctx);
    let navigation = view.delete(id).await?;
    announce(&navigation);
    println!("{}", view.summary());
    Ok(())
}

async fn settings(ctx: AdminContext, values: &[(String, String)]) -> Result<()> {
    let mut view = SettingsView::load(ctx);
    if values.is_empty() {
        print!("{}", render::settings(&view));
        return Ok(());
    }

    for (field, value) in values {
        view.set(field, value.as_str())?;
    }
    let submitted = view.submit().await;
    let navigation =
        submitted.map_err(|e| rejected::<guardpost_views::SettingsForm>(e, view.errors()))?;
    announce(&navigation);
    Ok(())
}

fn dashboard(ctx: &AdminContext) -> Result<()> {
    let dashboard = Dashboard::load(ctx, Utc::now());
    print!("{}", render::dashboard(&dashboard));
    Ok(())
}

fn reset(ctx: &AdminContext, target: &str) -> Result<()> {
    let keys: Vec<CollectionKey> = if target.eq_ignore_ascii_case("all") {
        CollectionKey::all().to_vec()
    } else {
        vec![target
            .parse()
            .map_err(|_| CliError::UnknownResetTarget(target.to_string()))?]
    };

    for key in keys {
        ctx.store.clear(key)?;
        info!("Reset {}", key.storage_key());
        println!("Cleared {}", key.display_name());
    }
    Ok(())
}
