use std::collections::HashSet;

use chrono::NaiveDate;
use log::info;

use crate::domain::{Match, RawRow};
use crate::errors::RankingError;

/// The sheet publishes dates as day/month/year.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Validates raw rows and returns the canonical match sequence, sorted by
/// date ascending then match id ascending. Every downstream component
/// assumes this order and never re-validates.
///
/// Fails fast on the first bad row; a partially validated history is never
/// handed out.
pub fn normalize(rows: &[RawRow]) -> Result<Vec<Match>, RankingError> {
    let mut matches = Vec::with_capacity(rows.len());
    let mut seen_ids = HashSet::new();

    for (row, raw) in rows.iter().enumerate() {
        let m = validate_row(row, raw)?;
        if !seen_ids.insert(m.id) {
            return Err(malformed(
                row,
                Some(m.id),
                format!("duplicate match id {}", m.id),
            ));
        }
        matches.push(m);
    }

    matches.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    info!("Normalized {} match records", matches.len());
    Ok(matches)
}

fn validate_row(row: usize, raw: &RawRow) -> Result<Match, RankingError> {
    let id = required(row, None, raw.match_id.as_deref(), "ID_Partida")?
        .trim()
        .parse::<i64>()
        .map_err(|_| malformed(row, None, "non-numeric ID_Partida"))?;

    let date = parse_date(row, id, required(row, Some(id), raw.date.as_deref(), "Data")?)?;
    let player_a = required(row, Some(id), raw.player_a.as_deref(), "Jogador_1")?.to_string();
    let player_b = required(row, Some(id), raw.player_b.as_deref(), "Jogador_2")?.to_string();
    let score_a = parse_score(row, id, raw.score_a.as_deref(), "Resultado_J1")?;
    let score_b = parse_score(row, id, raw.score_b.as_deref(), "Resultado_J2")?;

    if player_a == player_b {
        return Err(malformed(
            row,
            Some(id),
            format!("player '{player_a}' plays themselves"),
        ));
    }
    if score_a == score_b {
        return Err(malformed(
            row,
            Some(id),
            format!("tied score {score_a}-{score_b}; draws are not permitted"),
        ));
    }

    Ok(Match {
        id,
        date,
        player_a,
        player_b,
        score_a,
        score_b,
    })
}

fn required<'a>(
    row: usize,
    match_id: Option<i64>,
    value: Option<&'a str>,
    column: &str,
) -> Result<&'a str, RankingError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(malformed(row, match_id, format!("missing {column}"))),
    }
}

fn parse_date(row: usize, match_id: i64, value: &str) -> Result<NaiveDate, RankingError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| malformed(row, Some(match_id), format!("unparseable date '{value}'")))
}

fn parse_score(
    row: usize,
    match_id: i64,
    value: Option<&str>,
    column: &str,
) -> Result<i32, RankingError> {
    let score = required(row, Some(match_id), value, column)?
        .trim()
        .parse::<i32>()
        .map_err(|_| malformed(row, Some(match_id), format!("non-numeric {column}")))?;

    if score < 0 {
        return Err(malformed(
            row,
            Some(match_id),
            format!("negative {column} ({score})"),
        ));
    }
    Ok(score)
}

fn malformed(row: usize, match_id: Option<i64>, reason: impl Into<String>) -> RankingError {
    RankingError::MalformedRecord {
        row,
        match_id,
        reason: reason.into(),
    }
}
