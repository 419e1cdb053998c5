//! Error types for page mounting and behavior updates

/// Errors raised while mounting behaviors or talking to the host page.
///
/// Most of these mean the markup or stylesheet drifted away from what the
/// behaviors expect. They surface once, at mount time, instead of turning
/// into silent no-ops later.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("No global window available")]
    NoWindow,

    #[error("Window has no document")]
    NoDocument,

    #[error("Required element not found: {selector}")]
    MissingElement { selector: String },

    #[error("Style property '{property}' is not a valid item count: {value:?}")]
    InvalidStyleProperty { property: String, value: String },

    #[error("Slide {index} does not exist in the slider container")]
    MissingSlide { index: usize },

    #[error("DOM call failed while {context}: {message}")]
    Dom {
        context: &'static str,
        message: String,
    },
}
