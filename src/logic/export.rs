//! CSV export of the standings table.

use crate::models::Standing;
use std::io::Write;

/// Write a header row and one row per standing.
pub fn write_standings_csv<W: Write>(standings: &[Standing], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in standings {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Tournament, TournamentConfig};

    #[test]
    fn writes_header_and_rows() {
        let t = Tournament::with_players(
            vec![Player::new("Yugi"), Player::new("Kaiba")],
            TournamentConfig::default(),
        );
        let mut buf = Vec::new();
        write_standings_csv(&t.standings(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "rank,player_id,name,wins,losses,draws,points");
        assert!(lines[1].starts_with("1,"));
        assert!(lines[1].ends_with(",Yugi,0,0,0,0"));
        assert!(lines[2].ends_with(",Kaiba,0,0,0,0"));
    }
}
