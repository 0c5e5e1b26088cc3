//! Headless tabular data browser.
//!
//! Query state, a pure filter/sort/paginate derivation, cross-page row
//! selection, a guarded confirmation dialog and a debounced search
//! input, composed behind one [`Browser`](browser::Browser) handle.
//! Rendering, theming and data acquisition stay outside: a view layer
//! reads the derived state and calls the mutators, and a
//! [`RowSource`](source::RowSource) delivers the collection.

pub mod browser;
pub mod column;
pub mod confirm;
pub mod debounce;
pub mod error;
pub mod pager;
pub mod query;
pub mod row;
pub mod selection;
pub mod source;
pub mod view;

pub use browser::Browser;

pub mod prelude {
    pub use crate::browser::{Browser, BrowserConfig, BrowserId, BulkHandler, DetailHandler};
    pub use crate::column::{CellFormat, Column};
    pub use crate::confirm::{ConfirmDialog, DismissReason};
    pub use crate::debounce::{DEFAULT_DELAY, DebouncedInput};
    pub use crate::error::SourceError;
    pub use crate::pager::PageControls;
    pub use crate::query::{
        Direction, PER_PAGE_OPTIONS, PageSpec, QueryEvent, QueryParams, QueryState, SortSpec,
    };
    pub use crate::row::Row;
    pub use crate::selection::{PageSelection, SelectionSet};
    pub use crate::source::{Fetch, FetchState, MemorySource, RowSource};
    pub use crate::view::{View, derive};
}
