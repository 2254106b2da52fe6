use alloc::string::String;
use alloc::sync::Arc;

use crate::{Error, RenderWindow, Result, RetryPolicy};

/// Row height used before measurement when nothing else is configured.
pub const DEFAULT_MIN_ROW_HEIGHT: f64 = 40.0;

/// A callback fired once per completed window pass.
pub type OnRenderCallback<T> = Arc<dyn Fn(&RenderWindow<'_, T>) + Send + Sync>;

/// Tells whether the item at a source index may pin to the top of the viewport.
pub type StickyPredicate = Arc<dyn Fn(usize) -> bool + Send + Sync>;

/// Viewport sizing hint. The engine passes it through to the host untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeightHint {
    #[default]
    Auto,
    Css(String),
}

impl From<&str> for HeightHint {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Css(value.into())
        }
    }
}

/// How the host lays out rendered items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// A single column of items; sticky items are supported.
    #[default]
    List,
    /// Rows inside a table. Sticky items are disabled and the host keeps the table header in
    /// place using [`crate::VirtualScroll::header_offset`].
    Table,
}

impl Layout {
    pub fn supports_sticky(self) -> bool {
        matches!(self, Self::List)
    }
}

/// Plain-data settings, independent of the item type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Height assumed for unmeasured items; also sizes the overscan window.
    pub min_row_height: f64,
    pub height: HeightHint,
    pub layout: Layout,
    pub retry: RetryPolicy,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            height: HeightHint::Auto,
            layout: Layout::List,
            retry: RetryPolicy::default(),
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_row_height.is_finite() || self.min_row_height <= 0.0 {
            return Err(Error::InvalidConfiguration {
                field: "min_row_height",
                reason: "must be finite and greater than zero",
            });
        }
        self.retry.validate()
    }
}

/// Parses a markup-style `min-row-height` attribute.
///
/// The leading integer is used (`"50px"` gives 50). Anything without a positive leading
/// integer falls back to [`DEFAULT_MIN_ROW_HEIGHT`].
pub fn parse_min_row_height(value: &str) -> f64 {
    let value = value.trim();
    let digits = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    match value[..digits].parse::<i64>() {
        Ok(v) if v > 0 => v as f64,
        _ => DEFAULT_MIN_ROW_HEIGHT,
    }
}

/// Configuration for [`crate::VirtualScroll`].
///
/// Cheap to clone: the source sequence and callbacks live in `Arc`s. Replacing `items` with a
/// different `Arc` (or a different length) resets all measurements.
pub struct VirtualScrollOptions<T> {
    pub items: Arc<[T]>,
    pub config: ScrollConfig,
    /// Sticky-capability predicate, queried by source index. `None` means no item is sticky.
    pub is_sticky: Option<StickyPredicate>,
    pub on_render: Option<OnRenderCallback<T>>,
}

impl<T> Clone for VirtualScrollOptions<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            config: self.config.clone(),
            is_sticky: self.is_sticky.clone(),
            on_render: self.on_render.clone(),
        }
    }
}

impl<T> VirtualScrollOptions<T> {
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
            config: ScrollConfig::default(),
            is_sticky: None,
            on_render: None,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn min_row_height(&self) -> f64 {
        self.config.min_row_height
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    pub fn with_items(mut self, items: impl Into<Arc<[T]>>) -> Self {
        self.items = items.into();
        self
    }

    pub fn with_config(mut self, config: ScrollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_min_row_height(mut self, min_row_height: f64) -> Self {
        self.config.min_row_height = min_row_height;
        self
    }

    /// Same as `with_min_row_height`, but parses a markup attribute leniently.
    pub fn with_min_row_height_attr(mut self, value: &str) -> Self {
        self.config.min_row_height = parse_min_row_height(value);
        self
    }

    pub fn with_height(mut self, height: impl Into<HeightHint>) -> Self {
        self.config.height = height.into();
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn with_is_sticky(
        mut self,
        is_sticky: impl Fn(usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_sticky = Some(Arc::new(is_sticky));
        self
    }

    pub fn with_on_render(
        mut self,
        on_render: Option<impl Fn(&RenderWindow<'_, T>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_render = on_render.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T> core::fmt::Debug for VirtualScrollOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualScrollOptions")
            .field("count", &self.items.len())
            .field("config", &self.config)
            .field("is_sticky", &self.is_sticky.is_some())
            .field("on_render", &self.on_render.is_some())
            .finish()
    }
}
