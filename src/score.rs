use crate::errors::ScrapeError;

// Separators seen in score tokens: fbref publishes an en dash, manual
// edits occasionally leave an ASCII hyphen. Both are accepted.
const SEPARATORS: [char; 2] = ['\u{2013}', '-'];

/// Splits a combined "home–away" score token into goal counts. A blank
/// token is an unplayed or postponed fixture and maps to `(None, None)`;
/// anything else that fails to parse as two integers is a `ScoreParse`
/// error for the caller to decide on.
pub fn split_score(token: &str) -> Result<(Option<u32>, Option<u32>), ScrapeError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok((None, None));
    }
    let parse_error = || ScrapeError::ScoreParse {
        token: token.to_string(),
    };
    let (home, away) = token.split_once(SEPARATORS).ok_or_else(|| parse_error())?;
    let home = home.trim().parse().map_err(|_| parse_error())?;
    let away = away.trim().parse().map_err(|_| parse_error())?;
    Ok((Some(home), Some(away)))
}
