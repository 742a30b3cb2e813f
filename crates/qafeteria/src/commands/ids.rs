//! `qafeteria ids`: the element identifier catalogue.

use tabled::Tabled;

use qafeteria_core::Route;
use qafeteria_core::elements::{self, Element};

use crate::cli::{IdsArgs, ScreenArg};
use crate::commands::Context;
use crate::output;

#[derive(Tabled)]
struct ElementRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Screen")]
    screen: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<&Element> for ElementRow {
    fn from(e: &Element) -> Self {
        Self {
            id: e.id,
            screen: e.route.to_string(),
            role: e.role.to_string(),
            label: e.label.unwrap_or("-"),
            description: e.description,
        }
    }
}

fn route(screen: ScreenArg) -> Route {
    match screen {
        ScreenArg::Login => Route::Login,
        ScreenArg::Home => Route::Home,
    }
}

pub fn handle(args: &IdsArgs, ctx: &Context) {
    let selected: Vec<Element> = match args.screen {
        Some(screen) => elements::for_route(route(screen)).copied().collect(),
        None => elements::catalogue().to_vec(),
    };
    let out = output::render_list(
        ctx.format,
        &selected,
        |e: &Element| ElementRow::from(e),
        |e| e.id.to_owned(),
    );
    output::print_output(&out, ctx.quiet);
}
