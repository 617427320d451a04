/// Generates likely usernames for a person's full name
///
/// Uses the first and last name parts; middle names are ignored. Names with
/// fewer than two parts yield nothing.
///
/// # Examples
///
/// ```
/// use recon_fanout::recon::candidate_usernames;
///
/// let names = candidate_usernames("John Doe");
/// assert_eq!(names[0], "johndoe");
/// assert!(names.contains(&"jdoe".to_string()));
/// ```
pub fn candidate_usernames(full_name: &str) -> Vec<String> {
    let lowered = full_name.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    if parts.len() < 2 {
        return Vec::new();
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    let first_initial: String = first.chars().take(1).collect();
    let last_initial: String = last.chars().take(1).collect();

    let patterns = [
        format!("{}{}", first, last),
        format!("{}.{}", first, last),
        format!("{}_{}", first, last),
        format!("{}{}", first, last_initial),
        format!("{}{}", first_initial, last),
        format!("{}{}", last, first),
        format!("{}{}123", first, last),
        format!("{}_{}_", first, last),
    ];

    let mut candidates: Vec<String> = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        if !candidates.contains(&pattern) {
            candidates.push(pattern);
        }
    }
    candidates
}
