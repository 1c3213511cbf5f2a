//! Round-wise results data.
//!
//! The dashboard works off a pre-computed CSV with the columns
//! `Round, Candidate, Party, Total, Current Round`. This module loads that
//! file into typed rows and provides the aggregate views the charts draw:
//! per-round results, per-candidate progression, leaders, vote share, and
//! rank changes between rounds.

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;

use crate::error::{Error, Result};

/// One candidate's numbers for one counting round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRow {
    /// Counting round number.
    pub round: u32,
    /// Candidate name.
    pub candidate: String,
    /// Party name.
    pub party: String,
    /// Cumulative votes up to and including this round.
    pub total: i64,
    /// Votes gained in this round alone.
    pub current_round: i64,
}

/// Columns the rounds CSV must carry, by trimmed header name.
const REQUIRED_COLUMNS: [&str; 5] = ["Round", "Candidate", "Party", "Total", "Current Round"];

/// All rounds data, aggregated and ready for the dashboard views.
#[derive(Debug, Clone)]
pub struct RoundData {
    /// Rows aggregated by (round, candidate, party), ordered the same way.
    rows: Vec<RoundRow>,
}

impl RoundData {
    /// Load a rounds CSV from disk.
    ///
    /// Header names are trimmed before matching. Rows whose `Round` is not
    /// numeric are dropped; duplicate `(round, candidate, party)` rows are
    /// merged by summing their vote counts.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.clone();
        let trimmed: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let column = |name: &str| -> Result<usize> {
            trimmed
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        let (round_ix, candidate_ix, party_ix, total_ix, current_ix) = (
            column(REQUIRED_COLUMNS[0])?,
            column(REQUIRED_COLUMNS[1])?,
            column(REQUIRED_COLUMNS[2])?,
            column(REQUIRED_COLUMNS[3])?,
            column(REQUIRED_COLUMNS[4])?,
        );

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let field = |ix: usize| record.get(ix).unwrap_or("").trim();

            // Non-numeric rounds (footers, repeated headers) are dropped,
            // matching a numeric coercion with drop-on-failure.
            let Ok(round) = field(round_ix).parse::<u32>() else {
                warn!("rounds row {}: non-numeric round {:?}, dropped", line + 2, field(round_ix));
                continue;
            };
            let Ok(total) = parse_votes(field(total_ix)) else {
                warn!("rounds row {}: unreadable total {:?}, dropped", line + 2, field(total_ix));
                continue;
            };
            let Ok(current_round) = parse_votes(field(current_ix)) else {
                warn!("rounds row {}: unreadable round votes {:?}, dropped", line + 2, field(current_ix));
                continue;
            };

            rows.push(RoundRow {
                round,
                candidate: field(candidate_ix).to_string(),
                party: field(party_ix).to_string(),
                total,
                current_round,
            });
        }

        Self::from_rows(rows)
    }

    /// Build from in-memory rows, aggregating duplicates.
    pub fn from_rows(rows: Vec<RoundRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyData);
        }

        let mut merged: BTreeMap<(u32, String, String), (i64, i64)> = BTreeMap::new();
        for row in rows {
            let entry = merged
                .entry((row.round, row.candidate, row.party))
                .or_insert((0, 0));
            entry.0 += row.total;
            entry.1 += row.current_round;
        }

        let rows = merged
            .into_iter()
            .map(|((round, candidate, party), (total, current_round))| RoundRow {
                round,
                candidate,
                party,
                total,
                current_round,
            })
            .collect();
        Ok(Self { rows })
    }

    /// All aggregated rows, ordered by (round, candidate, party).
    pub fn rows(&self) -> &[RoundRow] {
        &self.rows
    }

    /// Sorted distinct round numbers.
    pub fn rounds(&self) -> Vec<u32> {
        let mut rounds: Vec<u32> = self.rows.iter().map(|r| r.round).collect();
        rounds.sort_unstable();
        rounds.dedup();
        rounds
    }

    /// Sorted distinct candidate names.
    pub fn candidates(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.iter().map(|r| r.candidate.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Rows belonging to one round.
    pub fn round_results(&self, round: u32) -> Vec<&RoundRow> {
        self.rows.iter().filter(|r| r.round == round).collect()
    }

    /// Combined votes counted in a round.
    pub fn round_total(&self, round: u32) -> i64 {
        self.round_results(round).iter().map(|r| r.total).sum()
    }

    /// A candidate's cumulative totals across rounds, in round order.
    pub fn progression(&self, candidate: &str) -> Vec<(u32, i64)> {
        self.rows
            .iter()
            .filter(|r| r.candidate == candidate)
            .map(|r| (r.round, r.total))
            .collect()
    }

    /// The leading row (highest total) of every round, in round order.
    ///
    /// Ties keep the first candidate encountered, like an index-of-max over
    /// rows ordered by candidate name.
    pub fn leaders(&self) -> Vec<&RoundRow> {
        let mut by_round: BTreeMap<u32, &RoundRow> = BTreeMap::new();
        for row in &self.rows {
            by_round
                .entry(row.round)
                .and_modify(|best| {
                    if row.total > best.total {
                        *best = row;
                    }
                })
                .or_insert(row);
        }
        by_round.into_values().collect()
    }

    /// A candidate's share of all votes counted, per round, as a percentage
    /// rounded to two decimals.
    pub fn vote_share(&self, candidate: &str) -> Vec<(u32, f64)> {
        self.progression(candidate)
            .into_iter()
            .map(|(round, total)| {
                let all = self.round_total(round);
                let share = if all == 0 {
                    0.0
                } else {
                    total as f64 / all as f64 * 100.0
                };
                (round, (share * 100.0).round() / 100.0)
            })
            .collect()
    }

    /// A candidate's rank within one round, by descending total.
    ///
    /// Uses the "min" method: tied totals share the smallest rank of the
    /// tie group. Rank 1 is the leader.
    pub fn rank(&self, round: u32, candidate: &str) -> Option<u32> {
        let results = self.round_results(round);
        let own = results.iter().find(|r| r.candidate == candidate)?.total;
        let ahead = results.iter().filter(|r| r.total > own).count();
        Some(ahead as u32 + 1)
    }

    /// Rank pivot: every candidate's rank in every round.
    ///
    /// One entry per candidate (sorted), with one `Option<u32>` per round in
    /// [`RoundData::rounds`] order; `None` where the candidate has no row.
    pub fn rank_table(&self) -> Vec<(String, Vec<Option<u32>>)> {
        let rounds = self.rounds();
        self.candidates()
            .into_iter()
            .map(|candidate| {
                let ranks = rounds
                    .iter()
                    .map(|&round| self.rank(round, &candidate))
                    .collect();
                (candidate, ranks)
            })
            .collect()
    }
}

/// Parse a vote count, tolerating thousands separators.
fn parse_votes(s: &str) -> std::result::Result<i64, std::num::ParseIntError> {
    s.replace(',', "").parse::<i64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(round: u32, candidate: &str, party: &str, total: i64, current: i64) -> RoundRow {
        RoundRow {
            round,
            candidate: candidate.into(),
            party: party.into(),
            total,
            current_round: current,
        }
    }

    fn sample() -> RoundData {
        RoundData::from_rows(vec![
            row(1, "AZHARUDDIN", "INC", 1200, 1200),
            row(1, "RAO", "BRS", 900, 900),
            row(1, "KUMAR", "BJP", 900, 900),
            row(2, "AZHARUDDIN", "INC", 2100, 900),
            row(2, "RAO", "BRS", 2300, 1400),
            row(2, "KUMAR", "BJP", 1500, 600),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_rows_rejected() {
        assert!(matches!(RoundData::from_rows(vec![]), Err(Error::EmptyData)));
    }

    #[test]
    fn test_duplicates_aggregated() {
        let data = RoundData::from_rows(vec![
            row(1, "A", "P", 10, 10),
            row(1, "A", "P", 5, 5),
        ])
        .unwrap();
        assert_eq!(data.rows().len(), 1);
        assert_eq!(data.rows()[0].total, 15);
        assert_eq!(data.rows()[0].current_round, 15);
    }

    #[test]
    fn test_rounds_and_candidates_sorted() {
        let data = sample();
        assert_eq!(data.rounds(), vec![1, 2]);
        assert_eq!(data.candidates(), vec!["AZHARUDDIN", "KUMAR", "RAO"]);
    }

    #[test]
    fn test_progression() {
        let data = sample();
        assert_eq!(data.progression("AZHARUDDIN"), vec![(1, 1200), (2, 2100)]);
        assert!(data.progression("NOBODY").is_empty());
    }

    #[test]
    fn test_leaders_per_round() {
        let data = sample();
        let leaders = data.leaders();
        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].candidate, "AZHARUDDIN");
        assert_eq!(leaders[1].candidate, "RAO");
    }

    #[test]
    fn test_leader_tie_keeps_first() {
        let data = RoundData::from_rows(vec![
            row(1, "B", "P1", 100, 100),
            row(1, "A", "P2", 100, 100),
        ])
        .unwrap();
        // Rows are ordered by candidate name, so A wins the tie.
        assert_eq!(data.leaders()[0].candidate, "A");
    }

    #[test]
    fn test_vote_share_rounded() {
        let data = RoundData::from_rows(vec![
            row(1, "A", "P1", 2, 2),
            row(1, "B", "P2", 1, 1),
        ])
        .unwrap();
        assert_eq!(data.vote_share("A"), vec![(1, 66.67)]);
        assert_eq!(data.vote_share("B"), vec![(1, 33.33)]);
    }

    #[test]
    fn test_rank_min_method_on_ties() {
        let data = RoundData::from_rows(vec![
            row(1, "A", "P1", 500, 500),
            row(1, "B", "P2", 500, 500),
            row(1, "C", "P3", 200, 200),
        ])
        .unwrap();
        assert_eq!(data.rank(1, "A"), Some(1));
        assert_eq!(data.rank(1, "B"), Some(1));
        assert_eq!(data.rank(1, "C"), Some(3));
        assert_eq!(data.rank(1, "D"), None);
    }

    #[test]
    fn test_rank_table_shape() {
        let data = sample();
        let table = data.rank_table();
        assert_eq!(table.len(), 3);
        let (name, ranks) = &table[0];
        assert_eq!(name, "AZHARUDDIN");
        assert_eq!(ranks, &vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_load_trims_headers_and_drops_bad_rounds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, " Round ,Candidate,Party,Total,Current Round").unwrap();
        writeln!(file, "1,A,P1,\"1,200\",1200").unwrap();
        writeln!(file, "total,-,-,9999,9999").unwrap();
        writeln!(file, "2,A,P1,2100,900").unwrap();
        file.flush().unwrap();

        let data = RoundData::load(file.path()).unwrap();
        assert_eq!(data.rows().len(), 2);
        assert_eq!(data.rows()[0].total, 1200);
        assert_eq!(data.rounds(), vec![1, 2]);
    }

    #[test]
    fn test_load_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Round,Candidate,Total,Current Round").unwrap();
        writeln!(file, "1,A,100,100").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            RoundData::load(file.path()),
            Err(Error::MissingColumn(c)) if c == "Party"
        ));
    }
}
