use vacancy_rollup::aggregator::StreamingAggregator;
use vacancy_rollup::output::{Level, OutputRow, RollupSink};
use vacancy_rollup::source::{Period, TractMetrics, TractRecord};
use vacancy_rollup::utils::error::{OutputError, SourceError};

#[derive(Default)]
struct VecSink {
    rows: Vec<(Level, OutputRow)>,
}

impl VecSink {
    fn at(&self, level: Level) -> Vec<&OutputRow> {
        self.rows
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, r)| r)
            .collect()
    }
}

impl RollupSink for VecSink {
    fn write_row(&mut self, level: Level, row: &OutputRow) -> Result<(), OutputError> {
        self.rows.push((level, row.clone()));
        Ok(())
    }
}

fn record(geo_id: &str, addresses: u64, avg: f64) -> Result<TractRecord, SourceError> {
    Ok(TractRecord {
        geo_id: geo_id.to_string(),
        month: None,
        year: None,
        metrics: TractMetrics {
            active_res: addresses,
            res_vac: 2,
            avg_days_vacant: avg,
            vac_0_3: 1,
            vac_3_6: 0,
            vac_6_12: 1,
            vac_12_24: 0,
            vac_24_36: 0,
            vac_36_plus: 0,
        },
    })
}

#[test]
fn test_four_record_two_state_rollup() {
    let records = vec![
        record("010010001", 10, 5.0),
        record("010010002", 10, 5.0),
        record("010030001", 10, 5.0),
        record("020010001", 10, 5.0),
    ];

    let mut sink = VecSink::default();
    let counts = StreamingAggregator::new(Period::new(3, 2015))
        .run(records, &mut sink)
        .unwrap();

    assert_eq!(counts.tract_rows, 4);

    let counties = sink.at(Level::County);
    assert_eq!(counties.len(), 3);
    assert_eq!(counties[0].geo_id, "01001");
    assert_eq!(counties[0].totals.active_res, 20);
    assert_eq!(counties[0].totals.avg_days_vacant, 5.0);
    assert_eq!(counties[1].geo_id, "01003");
    assert_eq!(counties[1].totals.active_res, 10);
    assert_eq!(counties[2].geo_id, "02001");
    assert_eq!(counties[2].totals.active_res, 10);

    let states = sink.at(Level::State);
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].geo_id, "01");
    assert_eq!(states[0].totals.active_res, 30);
    assert_eq!(states[1].geo_id, "02");
    assert_eq!(states[1].totals.active_res, 10);

    let national = sink.at(Level::National);
    assert_eq!(national.len(), 1);
    assert_eq!(national[0].totals.active_res, 40);
    assert_eq!(national[0].totals.avg_days_vacant, 5.0);
    assert_eq!(national[0].period, "03/2015");
}

#[test]
fn test_single_record_file_flushes_all_levels_once() {
    let mut sink = VecSink::default();
    StreamingAggregator::new(Period::new(3, 2015))
        .run(vec![record("010010001", 10, 5.0)], &mut sink)
        .unwrap();

    assert_eq!(sink.at(Level::Tract).len(), 1);
    assert_eq!(sink.at(Level::County).len(), 1);
    assert_eq!(sink.at(Level::State).len(), 1);
    assert_eq!(sink.at(Level::National).len(), 1);

    let county = sink.at(Level::County)[0];
    assert_eq!(county.totals.active_res, 10);
    assert_eq!(county.totals.avg_days_vacant, 5.0);
}

#[test]
fn test_mean_not_sum_for_days_vacant() {
    let records = vec![
        record("010010001", 1, 3.0),
        record("010010002", 1, 9.0),
    ];
    let mut sink = VecSink::default();
    StreamingAggregator::new(Period::new(3, 2015))
        .run(records, &mut sink)
        .unwrap();

    let county = sink.at(Level::County)[0];
    assert_eq!(county.totals.avg_days_vacant, 6.0);
    // counts still sum
    assert_eq!(county.totals.res_vac, 4);
}

#[test]
fn test_county_totals_conserve_to_national() {
    let records = vec![
        record("010010001", 7, 1.0),
        record("010030001", 11, 2.0),
        record("020010001", 13, 3.0),
    ];
    let mut sink = VecSink::default();
    StreamingAggregator::new(Period::new(3, 2015))
        .run(records, &mut sink)
        .unwrap();

    let county_sum: u64 = sink
        .at(Level::County)
        .iter()
        .map(|r| r.totals.active_res)
        .sum();
    assert_eq!(county_sum, sink.at(Level::National)[0].totals.active_res);
}

#[test]
fn test_consecutive_files_are_independent() {
    let mut sink = VecSink::default();
    StreamingAggregator::new(Period::new(3, 2015))
        .run(vec![record("010010001", 100, 50.0)], &mut sink)
        .unwrap();
    StreamingAggregator::new(Period::new(6, 2015))
        .run(vec![record("010010001", 1, 2.0)], &mut sink)
        .unwrap();

    let national = sink.at(Level::National);
    assert_eq!(national[0].totals.active_res, 100);
    assert_eq!(national[1].totals.active_res, 1);
    assert_eq!(national[1].totals.avg_days_vacant, 2.0);
}
