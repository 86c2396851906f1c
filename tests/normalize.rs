use mackolik_odds::normalize::{NormalizedOdds, OddsError, normalize};
use mackolik_odds::odds_table::OddsBlock;
use mackolik_odds::scheme::{self, HT_FT_OFFSET, SLOT_COUNT};

fn block(labels: &[&str], rows: &[&[&str]]) -> OddsBlock {
    OddsBlock {
        labels: labels.iter().map(|s| s.to_string()).collect(),
        value_rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

fn ht_ft_block() -> OddsBlock {
    block(
        &["İlk Yarı / Maç Sonucu"],
        &[
            &["7.00", "10.00", "18.00"],
            &["7.75", "5.50", "4.25"],
            &["22.00", "11.00", "2.35"],
        ],
    )
}

fn sample_blocks() -> Vec<OddsBlock> {
    vec![
        block(
            &["Maç Sonucu", "Handikap"],
            &[&["3.60", "3.30", "1.60", "+1h", "1.75", "3.30", "2.50", ""]],
        ),
        block(
            &["IY 1,5 Gol", "AÜ 1,5 Gol", "AÜ 2,5 Gol", "AÜ 3,5 Gol"],
            &[&["1.45", "1.80", "-", "-", "2.15", "1.35", "1.55", "1.65"]],
        ),
        block(
            &["Karşılıklı Gol", "İlk Yarı Sonucu"],
            &[&["1.25", "2.20", "3.60", "2.10", "2.00"]],
        ),
        block(
            &["Çifte Şans", "Toplam Gol"],
            &[&["1.72", "1.11", "1.08", "4.50", "2.00", "1.95", "9.00"]],
        ),
        ht_ft_block(),
        block(&["Maç Sonucu"], &[]),
    ]
}

#[test]
fn canonical_first_block_fills_result_and_handicap() {
    let odds = normalize(&sample_blocks()).expect("valid blocks");
    let head: Vec<&str> = odds.fields().take(8).collect();
    assert_eq!(
        head,
        vec!["3.60", "3.30", "1.60", "+1h", "1.75", "3.30", "2.50", ""]
    );
}

#[test]
fn empty_input_is_all_blank() {
    let odds = normalize(&[]).expect("empty is valid");
    assert!(odds.is_blank());
    assert_eq!(odds.fields().count(), SLOT_COUNT);
    assert!(odds.fields().all(str::is_empty));
    assert_eq!(odds, NormalizedOdds::default());
}

#[test]
fn dash_never_survives_normalization() {
    let odds = normalize(&sample_blocks()).expect("valid blocks");
    assert!(odds.fields().all(|v| v != "-"));
    assert_eq!(odds.get(10), None);
    assert_eq!(odds.get(11), None);

    let dashed = block(
        &["İlk Yarı / Maç Sonucu"],
        &[&["-", "10.00", "18.00"], &["7.75", "-", "4.25"], &["22.00", "11.00", "-"]],
    );
    let odds = normalize(&[dashed]).expect("valid matrix");
    assert_eq!(odds.get(HT_FT_OFFSET), None);
    assert_eq!(odds.get(HT_FT_OFFSET + 4), None);
    assert_eq!(odds.get(HT_FT_OFFSET + 8), None);
    assert_eq!(odds.get(HT_FT_OFFSET + 1), Some("10.00"));
}

#[test]
fn matrix_fills_tail_slots_row_major_regardless_of_position() {
    let expected = [
        "7.00", "10.00", "18.00", "7.75", "5.50", "4.25", "22.00", "11.00", "2.35",
    ];

    let alone = normalize(&[ht_ft_block()]).expect("valid matrix");
    let mut blocks = sample_blocks();
    blocks.rotate_left(4);
    let first = normalize(&blocks).expect("valid blocks");

    for odds in [alone, first] {
        let tail: Vec<&str> = odds.fields().skip(HT_FT_OFFSET).collect();
        assert_eq!(tail, expected);
    }
}

#[test]
fn each_block_consumes_its_whole_value_row() {
    for b in sample_blocks().iter().filter(|b| b.labels.len() > 1) {
        let consumed: usize = b
            .labels
            .iter()
            .map(|l| scheme::lookup(l).expect("known label").expected_count)
            .sum();
        assert_eq!(consumed, b.value_rows[0].len(), "block {:?}", b.labels);
    }
}

#[test]
fn normalizing_twice_is_identical() {
    let blocks = sample_blocks();
    let a = normalize(&blocks).expect("valid blocks");
    let b = normalize(&blocks).expect("valid blocks");
    assert_eq!(a, b);
}

#[test]
fn bogus_label_is_reported_not_shifted() {
    let mut blocks = sample_blocks();
    blocks[2] = block(
        &["Karşılıklı Gol", "Korner Sayısı", "İlk Yarı Sonucu"],
        &[&["1.25", "2.20", "1.90", "1.90", "3.60", "2.10", "2.00"]],
    );
    let err = normalize(&blocks).unwrap_err();
    assert_eq!(
        err,
        OddsError::UnknownCategory {
            label: "Korner Sayısı".to_string()
        }
    );
}

#[test]
fn count_mismatch_is_malformed() {
    let blocks = vec![block(
        &["Çifte Şans", "Toplam Gol"],
        &[&["1.72", "1.11", "1.08", "4.50", "2.00", "1.95"]],
    )];
    match normalize(&blocks) {
        Err(OddsError::MalformedOddsBlock { labels, reason }) => {
            assert_eq!(labels, vec!["Çifte Şans", "Toplam Gol"]);
            assert!(reason.contains("expected 7"));
        }
        other => panic!("expected malformed block, got {other:?}"),
    }
}
