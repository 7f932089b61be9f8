//! Edge accessor contracts
//!
//! Consumers wiring an edge need "the config for the output side" and "the
//! config for the input side" without knowing which stage ordinal owns
//! which. These accessors are pure passthroughs: they never mutate and never
//! merge, they only enforce that both endpoints exist.

use chainconf_store::ConfigStore;

use crate::error::TranslateError;

/// Configuration for the output side of an edge: the source stage, unmodified
///
/// # Errors
/// [`TranslateError::MissingConfig`] when either endpoint is absent.
pub fn output_conf_on_edge<'a>(
    src: Option<&'a ConfigStore>,
    dest: Option<&ConfigStore>,
) -> Result<&'a ConfigStore, TranslateError> {
    let src = src.ok_or(TranslateError::MissingConfig {
        role: "source vertex",
    })?;
    dest.ok_or(TranslateError::MissingConfig {
        role: "destination vertex",
    })?;
    Ok(src)
}

/// Configuration for the input side of an edge: the destination stage,
/// unmodified
///
/// # Errors
/// [`TranslateError::MissingConfig`] when either endpoint is absent.
pub fn input_conf_on_edge<'a>(
    src: Option<&ConfigStore>,
    dest: Option<&'a ConfigStore>,
) -> Result<&'a ConfigStore, TranslateError> {
    src.ok_or(TranslateError::MissingConfig {
        role: "source vertex",
    })?;
    dest.ok_or(TranslateError::MissingConfig {
        role: "destination vertex",
    })
}
