//! Site template expansion for the existence probe

use crate::TemplateError;
use url::Url;

/// Placeholder replaced by the candidate identifier
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// Returns true if the template contains the placeholder
pub fn has_placeholder(template: &str) -> bool {
    template.contains(USERNAME_PLACEHOLDER)
}

/// Substitutes the first `{username}` in `template` with `candidate`
///
/// The expanded string is returned verbatim (it is the result key), but it
/// must still parse as a URL.
///
/// # Errors
///
/// * `TemplateError::MissingPlaceholder` - the template has no placeholder
/// * `TemplateError::InvalidUrl` - the expanded text is not a valid URL
///
/// # Examples
///
/// ```
/// use recon_fanout::url::expand_template;
///
/// let url = expand_template("GitHub", "https://github.com/{username}", "alice").unwrap();
/// assert_eq!(url, "https://github.com/alice");
/// ```
pub fn expand_template(site: &str, template: &str, candidate: &str) -> Result<String, TemplateError> {
    if !has_placeholder(template) {
        return Err(TemplateError::MissingPlaceholder {
            site: site.to_string(),
            template: template.to_string(),
        });
    }

    let expanded = template.replacen(USERNAME_PLACEHOLDER, candidate, 1);

    Url::parse(&expanded).map_err(|e| TemplateError::InvalidUrl {
        site: site.to_string(),
        url: expanded.clone(),
        reason: e.to_string(),
    })?;

    Ok(expanded)
}
