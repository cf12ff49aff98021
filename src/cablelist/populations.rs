//! Reference rows seeded into the lookup tables.

use crate::population::{PopulationError, TablePopulationSchema};

pub(super) const POPULATIONS: [fn() -> Result<TablePopulationSchema, PopulationError>; 4] =
    [modification, connection_type, link_type, link_direction];

fn population(table_name: &str, field_names: &[&str]) -> TablePopulationSchema {
    let mut tp = TablePopulationSchema::new(format!("{table_name} data"), table_name);
    tp.add_field_names(field_names.iter().copied());
    tp
}

/// Commit rows made only of text values.
fn commit_text_rows(tp: &mut TablePopulationSchema, rows: &[&[&str]]) -> Result<(), PopulationError> {
    for row in rows {
        let buffer = tp.current_row_data();
        for value in *row {
            buffer.add(*value);
        }
        tp.commit_current_row_data()?;
    }
    Ok(())
}

fn modification() -> Result<TablePopulationSchema, PopulationError> {
    let mut tp = population(
        "Modification_tbl",
        &["Code_PK", "SortOrder", "NameEN", "NameDE", "NameFR", "NameIT"],
    );
    let rows: [(&str, i64, [&str; 4]); 6] = [
        ("NEW", 3, ["New", "Neu", "Nouveau", "Nuovo"]),
        ("REM", 3, ["Remove", "Entfernen", "Supprimer", "Rimuovere"]),
        ("MOD", 3, ["Modifiy", "Ändern", "Modifier", "Modificare"]),
        ("MODNEW", 2, ["Modifiy (+)", "Ändern (+)", "Modifier (+)", "Modificare (+)"]),
        ("MODREM", 1, ["Modifiy (-)", "Ändern (-)", "Modifier (-)", "Modificare (-)"]),
        ("EXISTS", 3, ["Existing", "Bestehend", "Existant", "Esistente"]),
    ];
    for (code, sort_order, names) in rows {
        let buffer = tp.current_row_data();
        buffer.add(code).add(sort_order);
        for name in names {
            buffer.add(name);
        }
        tp.commit_current_row_data()?;
    }
    Ok(tp)
}

fn connection_type() -> Result<TablePopulationSchema, PopulationError> {
    let mut tp = population(
        "ConnectionType_tbl",
        &["Code_PK", "NameEN", "NameDE", "NameFR", "NameIT"],
    );
    commit_text_rows(
        &mut tp,
        &[
            &["T", "Terminal", "Klemme", "Borne", "Terminale"],
            &["P", "Pin (male)", "Stift (männlich)", "Contact (mâle)", "perno (maschio)"],
            &["S", "Socket (female)", "Buchse (weiblich)", "Douille (femelle)", "presa (femminile)"],
        ],
    )?;
    Ok(tp)
}

fn link_type() -> Result<TablePopulationSchema, PopulationError> {
    let mut tp = population(
        "LinkType_tbl",
        &["Code_PK", "NameEN", "NameDE", "NameFR", "NameIT", "ValueUnit"],
    );
    commit_text_rows(
        &mut tp,
        &[
            &["CABLELINK", "Cable link", "Kabel Verbindung", "Liaison cablée", "Collegamento via cavo", "Ohm"],
            &["INTERNLINK", "Internal link", "Interne Verbindung", "Liaison interne", "Collegamento interno", "Ohm"],
            &["CONNECTION", "Connection", "Anschluss", "Raccordement", "Collegamento", "Ohm"],
            &["TESTLINK", "Test link", "Test Verbindung", "Liaison de test", "Collegamento test", "Ohm"],
        ],
    )?;
    Ok(tp)
}

fn link_direction() -> Result<TablePopulationSchema, PopulationError> {
    let mut tp = population(
        "LinkDirection_tbl",
        &["Code_PK", "PictureAscii", "NameEN", "NameDE", "NameFR", "NameIT"],
    );
    commit_text_rows(
        &mut tp,
        &[
            &["BID", "<-->", "Bidirectional", "Bidirektional", "Bidirectionnel", "Bidirezionale"],
            &["STE", "-->", "Start to end", "Start zum Ende", "Départ vers arrivée", "Dall'inizio alla fine"],
            &["ETS", "<--", "End to Start", "Ende zum Start", "Arrivée vers départ", "Dall'fine alla inizio"],
        ],
    )?;
    Ok(tp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;

    #[test]
    fn test_row_counts() {
        let counts: Vec<_> = POPULATIONS
            .iter()
            .map(|build| {
                let tp = build().unwrap();
                (tp.table_name.clone(), tp.row_count())
            })
            .collect();
        assert_eq!(
            counts,
            [
                ("Modification_tbl".to_string(), 6),
                ("ConnectionType_tbl".to_string(), 3),
                ("LinkType_tbl".to_string(), 4),
                ("LinkDirection_tbl".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_modification_rows() {
        let tp = modification().unwrap();
        assert_eq!(tp.name, "Modification_tbl data");
        assert_eq!(
            tp.row_data(3).unwrap(),
            [
                Value::from("MODNEW"),
                Value::Integer(2),
                Value::from("Modifiy (+)"),
                Value::from("Ändern (+)"),
                Value::from("Modifier (+)"),
                Value::from("Modificare (+)"),
            ]
        );
    }

    #[test]
    fn test_rows_match_field_count() {
        for build in POPULATIONS {
            let tp = build().unwrap();
            let width = tp.field_names().len();
            assert!(tp.rows().iter().all(|row| row.len() == width));
        }
    }
}
