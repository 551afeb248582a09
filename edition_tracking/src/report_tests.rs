//! Unit tests for report rendering and file output.

use super::*;
use crate::reconcile::FormatCoverage;
use tempfile::TempDir;

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn coverage(implemented: &[&str], missing: &[&str]) -> Coverage {
    Coverage {
        implemented: names(implemented),
        missing: names(missing),
    }
}

fn set_coverage(code: &str, name: &str, coverage: Coverage) -> SetCoverage {
    SetCoverage {
        code: code.to_string(),
        name: name.to_string(),
        coverage,
    }
}

fn oracle() -> OracleCatalog {
    OracleCatalog::from_json(
        r#"{
        "Black Lotus": {
            "manaCost": "{0}",
            "type": "Artifact",
            "text": "{T}, Sacrifice Black Lotus: Add three mana of any one color."
        },
        "Grizzly Bears": {
            "manaCost": "{1}{G}",
            "type": "Creature — Bear",
            "power": "2",
            "toughness": "2",
            "text": ""
        },
        "Jace Beleren": {
            "manaCost": "{2}{U}{U}",
            "type": "Legendary Planeswalker — Jace",
            "loyalty": "3",
            "text": "+2: Each player draws a card."
        },
        "Lim-Döl's Vault": {
            "type": "Legendary Artifact"
        }
    }"#,
    )
    .unwrap()
}

fn reconciliation() -> Reconciliation {
    Reconciliation {
        sets: vec![
            set_coverage("AAA", "Alpha", coverage(&["Forest"], &["Black Lotus"])),
            set_coverage("BBB", "Beta", coverage(&["Forest", "Island"], &[])),
            set_coverage("NIL", "Empty", Coverage::default()),
            set_coverage("CCC", "", coverage(&[], &["Jace Beleren"])),
        ],
        distinct: coverage(&["Forest", "Island"], &["Black Lotus", "Jace Beleren"]),
        formats: vec![
            FormatCoverage {
                name: "Standard".to_string(),
                sets: vec!["BBB".to_string()],
                coverage: coverage(&["Forest", "Island"], &[]),
            },
            FormatCoverage {
                name: "Pioneer".to_string(),
                sets: Vec::new(),
                coverage: Coverage::default(),
            },
        ],
    }
}

#[test]
fn set_report_includes_oracle_details() {
    let set = set_coverage(
        "AAA",
        "Alpha",
        coverage(
            &["Forest"],
            &["Black Lotus", "Grizzly Bears", "Jace Beleren", "Unknown"],
        ),
    );
    let mut buf = Vec::new();
    render_set(&mut buf, &set, &oracle()).unwrap();

    let expected = concat!(
        "Implemented (1):\nForest\n\n",
        "Missing (4):\n",
        "Black Lotus\n{0}\nArtifact\n{T}, Sacrifice Black Lotus: Add three mana of any one color.\n\n",
        "Grizzly Bears\n{1}{G}\nCreature - Bear\nPT:2/2\n\n\n",
        "Jace Beleren\n{2}{U}{U}\nLegendary Planeswalker - Jace\nLoyalty:3\n+2: Each player draws a card.\n\n",
        "Unknown\n\n",
        "\nTotal: 5\nPercentage implemented: 20.00%\n",
    );
    assert_eq!(String::from_utf8(buf).unwrap(), expected);
}

#[test]
fn card_set_without_mirror_writes_primary_only() {
    let mut buf = Vec::new();
    let codes = vec!["AAA".to_string(), "BBB".to_string()];
    {
        let mut out = Tee::primary_only(&mut buf);
        render_card_set(
            &mut out,
            &coverage(&["Forest", "Lightning Bolt"], &["Black Lotus"]),
            Some(codes.as_slice()),
            false,
        )
        .unwrap();
    }

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "AAA BBB\nImplemented (Missing) / Total = Percentage Implemented\n2 (1) / 3 = 66.67 %\n\nMissing (1):\nBlack Lotus\n"
    );
}

#[test]
fn implemented_listing_is_not_mirrored() {
    let mut primary = Vec::new();
    let mut mirror = Vec::new();
    {
        let mut out = Tee::new(&mut primary, Some(&mut mirror));
        render_card_set(
            &mut out,
            &coverage(&["Forest", "Lightning Bolt"], &["Black Lotus"]),
            None,
            true,
        )
        .unwrap();
    }

    let primary = String::from_utf8(primary).unwrap();
    let mirror = String::from_utf8(mirror).unwrap();
    assert!(primary.contains("\nImplemented (2):\nForest\nLightning Bolt\nMissing (1):"));
    assert!(!mirror.contains("Implemented (2):"));
    assert!(mirror.ends_with("2 (1) / 3 = 66.67 %\n\nMissing (1):\nBlack Lotus\n"));
}

#[test]
fn overall_is_ranked_and_skips_unmapped_sets() {
    let mut buf = Vec::new();
    {
        let mut out = Tee::primary_only(&mut buf);
        render_overall(&mut out, &reconciliation()).unwrap();
    }

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        concat!(
            "Set: Implemented (Missing) / Total = Percentage Implemented\n",
            "Beta: 2 (0) / 2 = 100.00%\n",
            "Alpha: 1 (1) / 2 = 50.00%\n",
            "CCC: 0 (1) / 1 = 0.00%\n",
            "\nTotal over all sets: 3 (2) / 5 = 60.00%\n",
        )
    );
}

#[test]
fn overall_without_cards_has_no_percentage() {
    let mut buf = Vec::new();
    {
        let mut out = Tee::primary_only(&mut buf);
        render_overall(&mut out, &Reconciliation::default()).unwrap();
    }
    assert!(String::from_utf8(buf)
        .unwrap()
        .ends_with("\nTotal over all sets: 0 (0) / 0\n"));
}

#[test]
fn distinct_oracle_degrades_to_bare_names() {
    let missing = names(&["", "Black Lotus", "Unknown", "Lim-Dol's Vault"]);
    let mut buf = Vec::new();
    render_distinct_oracle(&mut buf, &missing, &oracle()).unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        concat!(
            "Black Lotus\n{T}, Sacrifice Black Lotus: Add three mana of any one color.\n\n",
            "Lim-Dol's Vault\n\n",
            "Unknown\n\n",
            "\n",
        )
    );
}

#[test]
fn writer_creates_all_reports_and_release() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("EditionTrackingResults");
    let oracle = oracle();

    let mut writer = ReportWriter::new(&out_dir, &oracle, false, true).unwrap();
    writer.write_all(&reconciliation()).unwrap();
    writer.finish().unwrap();

    for file in [
        "set_AAA.txt",
        "set_BBB.txt",
        "set_NIL.txt",
        "set_CCC.txt",
        DISTINCT_STATS_FILE,
        COMPLETE_STATS_FILE,
        "FormatStandard.txt",
        DISTINCT_ORACLE_FILE,
        RELEASE_STATS_FILE,
    ] {
        assert!(out_dir.join(file).exists(), "missing {}", file);
    }
    // Formats without cards are skipped
    assert!(!out_dir.join("FormatPioneer.txt").exists());

    let release = std::fs::read_to_string(out_dir.join(RELEASE_STATS_FILE)).unwrap();
    assert!(release.starts_with("[spoiler=DistinctStats.txt]\n"));
    assert!(release.contains("[/spoiler]\n\n[spoiler=Overall Editions]\n"));
    assert!(release.contains("[spoiler=FormatStandard.txt]\nBBB\n"));
    assert!(release.ends_with("[/spoiler]\n\n"));
    assert!(!release.contains("[spoiler=FormatPioneer.txt]"));

    let distinct = std::fs::read_to_string(out_dir.join(DISTINCT_STATS_FILE)).unwrap();
    assert!(release.contains(&distinct));
}

#[test]
fn writer_without_release_skips_mirror() {
    let temp_dir = TempDir::new().unwrap();
    let oracle = oracle();

    let mut writer = ReportWriter::new(temp_dir.path(), &oracle, true, false).unwrap();
    writer.write_all(&reconciliation()).unwrap();
    writer.finish().unwrap();

    assert!(!temp_dir.path().join(RELEASE_STATS_FILE).exists());
    let distinct = std::fs::read_to_string(temp_dir.path().join(DISTINCT_STATS_FILE)).unwrap();
    assert!(distinct.contains("\nImplemented (2):\nForest\nIsland"));
}

#[test]
fn file_names() {
    assert_eq!(set_file_name(" M10 "), "set_M10.txt");
    assert_eq!(format_file_name("Modern"), "FormatModern.txt");
}
