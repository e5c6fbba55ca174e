//! What the search screen shows, and how it is laid out.
//!
//! [`ViewState`] is the single value published by the pipeline. The
//! projection functions are pure: the same state and viewport always give the
//! same [`RenderDirective`].

use crate::data_models::SearchResult;
use crate::error::FetchError;

/// Smallest edge of a grid cell, in layout units.
pub const MIN_CELL: u32 = 120;

pub const IDLE_PROMPT: &str = "Search public photos by tag";
pub const EMPTY_RESULTS_MESSAGE: &str = "No photos match this search";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    /// Never holds an empty result; see [`ViewState::from_fetch`].
    Content(SearchResult),
    EmptyResults,
    Error(Option<String>),
}

impl ViewState {
    /// Classify a finished fetch.
    pub fn from_fetch(outcome: Result<SearchResult, FetchError>) -> ViewState {
        match outcome {
            Ok(result) if result.is_empty() => ViewState::EmptyResults,
            Ok(result) => ViewState::Content(result),
            Err(e) => ViewState::Error(Some(e.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Content(_) => "content",
            ViewState::EmptyResults => "empty",
            ViewState::Error(_) => "error",
        }
    }
}

/// State of the query text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocusState {
    Idle,
    FocusedNoInput,
    HasInput,
}

impl InputFocusState {
    pub fn derive(query: &str, focused: bool) -> InputFocusState {
        if !query.is_empty() {
            InputFocusState::HasInput
        } else if focused {
            InputFocusState::FocusedNoInput
        } else {
            InputFocusState::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    /// Scrolls vertically, fixed number of columns.
    Columns(u32),
    /// Scrolls horizontally, fixed number of rows.
    Rows(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDirective {
    Prompt(&'static str),
    Progress,
    Grid {
        layout: GridLayout,
        cell_size: u32,
        item_count: usize,
    },
    Message(String),
}

pub fn project(state: &ViewState, viewport: Viewport) -> RenderDirective {
    match state {
        ViewState::Idle => RenderDirective::Prompt(IDLE_PROMPT),
        ViewState::Loading => RenderDirective::Progress,
        ViewState::Content(result) => {
            let (layout, cell_size) = grid_for(viewport);
            RenderDirective::Grid {
                layout,
                cell_size,
                item_count: result.len(),
            }
        }
        ViewState::EmptyResults => RenderDirective::Message(EMPTY_RESULTS_MESSAGE.to_string()),
        ViewState::Error(msg) => RenderDirective::Message(
            msg.clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        ),
    }
}

fn grid_for(viewport: Viewport) -> (GridLayout, u32) {
    match viewport.orientation() {
        Orientation::Portrait => {
            let columns = (viewport.width / MIN_CELL).max(1);
            (GridLayout::Columns(columns), viewport.width / columns)
        }
        Orientation::Landscape => {
            let rows = (viewport.height / MIN_CELL).max(1);
            (GridLayout::Rows(rows), viewport.height / rows)
        }
    }
}
