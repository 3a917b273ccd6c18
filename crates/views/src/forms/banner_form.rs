//! Banner form

use guardpost_core::AdminResult;
use guardpost_model::{Banner, BannerPlacement, FieldErrors, validation};

use super::date_input;
use crate::form::{Draft, FieldKind, FieldSpec, FormSchema, STATUS_OPTIONS, parsed};

/// Allowed banner placements
pub const PLACEMENT_OPTIONS: &[&str] = &["home", "services", "about", "contact"];

/// Add/edit form for banners
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerForm;

impl FormSchema for BannerForm {
    type Target = Banner;

    const FORM: &'static str = "banner";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("subtitle", "Subtitle", FieldKind::Text),
        FieldSpec::new("image", "Image", FieldKind::File).required(),
        FieldSpec::new("link", "Link", FieldKind::Url),
        FieldSpec::new("placement", "Placement", FieldKind::Select(PLACEMENT_OPTIONS))
            .default_value("home"),
        FieldSpec::new("display_order", "Display order", FieldKind::Integer).default_value("0"),
        FieldSpec::new("start_date", "Start date", FieldKind::Date),
        FieldSpec::new("end_date", "End date", FieldKind::Date),
        FieldSpec::new("status", "Status", FieldKind::Select(STATUS_OPTIONS))
            .default_value("active"),
    ];

    fn blank() -> Banner {
        Banner::new("", "")
    }

    fn load(banner: &Banner, draft: &mut Draft) {
        draft.set("title", &banner.title);
        draft.set("subtitle", banner.subtitle.clone().unwrap_or_default());
        draft.set("image", &banner.image);
        draft.set("link", banner.link.clone().unwrap_or_default());
        draft.set("placement", banner.placement.as_str());
        draft.set("display_order", banner.display_order.to_string());
        draft.set("start_date", date_input(banner.start_date));
        draft.set("end_date", date_input(banner.end_date));
        draft.set("status", banner.status.as_str());
    }

    fn check(draft: &Draft, errors: &mut FieldErrors) {
        let start = validation::optional_date(draft.get("start_date"), "Start date");
        let end = validation::optional_date(draft.get("end_date"), "End date");
        if let (Ok(start), Ok(end)) = (start, end) {
            errors.check("end_date", validation::date_order(start, end));
        }
    }

    fn apply(draft: &Draft, banner: &mut Banner) -> AdminResult<()> {
        let form = Self::FORM;
        banner.title = draft.get("title").trim().to_string();
        banner.subtitle = draft.optional("subtitle");
        banner.image = draft.get("image").trim().to_string();
        banner.link = draft.optional("link");
        banner.placement = parsed(
            form,
            "placement",
            draft.get("placement").parse::<BannerPlacement>(),
        )?;
        banner.display_order = parsed(
            form,
            "display_order",
            validation::non_negative_integer(draft.get("display_order"), "Display order"),
        )?
        .unwrap_or(0);
        banner.start_date = parsed(
            form,
            "start_date",
            validation::optional_date(draft.get("start_date"), "Start date"),
        )?;
        banner.end_date = parsed(
            form,
            "end_date",
            validation::optional_date(draft.get("end_date"), "End date"),
        )?;
        banner.status = draft.get("status").parse()?;
        Ok(())
    }
}
