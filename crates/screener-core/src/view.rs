//! Pipeline composition: range filter, then text search, then sort.
//!
//! [`derive_view`] is the pure entry point. [`Screener`] keeps a source
//! snapshot together with the current [`ScreenParams`] and recomputes the
//! view from the full source on every change.

use tracing::debug;

use crate::ordering::{sort, SortState};
use crate::range::RangeConditions;
use crate::record::{Field, Record};
use crate::search::search;

/// Everything that determines the derived view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenParams {
    /// Metric bounds.
    pub conditions: RangeConditions,
    /// Free-text query; empty matches everything.
    pub query: String,
    /// Current ordering.
    pub sort: SortState,
}

impl ScreenParams {
    /// Creates default parameters: `[0, 100]` bounds, no query, unsorted.
    pub fn new() -> Self {
        ScreenParams::default()
    }

    /// Sets the range conditions.
    pub fn conditions(mut self, conditions: RangeConditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Sets the search query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the sort state.
    pub fn sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    /// Runs the pipeline over an already-borrowed sequence.
    ///
    /// Applying the same parameters to a result of this method returns the
    /// same sequence.
    pub fn apply<'a>(&self, records: &[&'a Record]) -> Vec<&'a Record> {
        run_stages(records.iter().copied(), self)
    }
}

/// The records currently shown, plus the size of the source they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView<'a> {
    records: Vec<&'a Record>,
    total: usize,
}

impl<'a> ScreenView<'a> {
    /// The matching records, in display order.
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in the source collection.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterates the matching records.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    /// Clones the matching records out of the source.
    pub fn to_owned_records(&self) -> Vec<Record> {
        self.records.iter().map(|record| (*record).clone()).collect()
    }
}

/// Derives the displayed sequence from the full source.
///
/// Filter, search and sort run in that order. The source is only borrowed.
pub fn derive_view<'a>(source: &'a [Record], params: &ScreenParams) -> ScreenView<'a> {
    ScreenView {
        records: run_stages(source.iter(), params),
        total: source.len(),
    }
}

fn run_stages<'a, I>(records: I, params: &ScreenParams) -> Vec<&'a Record>
where
    I: ExactSizeIterator<Item = &'a Record>,
{
    let total = records.len();
    let filtered: Vec<&'a Record> = records
        .filter(|record| params.conditions.matches(record))
        .collect();
    debug!(total, matched = filtered.len(), "range filter applied");

    let found = search(&filtered, &params.query);
    debug!(query = %params.query, matched = found.len(), "text search applied");

    let records = sort(&found, params.sort);
    debug!(sort = %params.sort, "sort applied");
    records
}

/// A screening session over an immutable record snapshot.
///
/// # Example
///
/// ```
/// use screener_core::{Field, Screener, loader};
///
/// let mut screener = Screener::new(loader::sample_records());
/// screener.set_query("to");
/// screener.select_sort(Field::CupDepth);
///
/// let view = screener.view();
/// assert!(view.len() <= view.total());
/// ```
#[derive(Debug, Clone)]
pub struct Screener {
    source: Vec<Record>,
    params: ScreenParams,
}

impl Screener {
    /// Starts a session with default parameters.
    pub fn new(source: Vec<Record>) -> Self {
        Screener {
            source,
            params: ScreenParams::default(),
        }
    }

    /// The source snapshot.
    pub fn source(&self) -> &[Record] {
        &self.source
    }

    /// The current parameters.
    pub fn params(&self) -> &ScreenParams {
        &self.params
    }

    /// Replaces the range conditions.
    pub fn set_conditions(&mut self, conditions: RangeConditions) {
        self.params.conditions = conditions;
    }

    /// Replaces the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.params.query = query.into();
    }

    /// Applies one column selection to the sort state and returns the new state.
    pub fn select_sort(&mut self, field: Field) -> SortState {
        self.params.sort = self.params.sort.select(field);
        debug!(%field, sort = %self.params.sort, "sort selection");
        self.params.sort
    }

    /// Restores default parameters.
    pub fn reset(&mut self) {
        self.params = ScreenParams::default();
    }

    /// Replaces the source snapshot, keeping the current parameters.
    pub fn reload(&mut self, source: Vec<Record>) {
        self.source = source;
    }

    /// Derives the view for the current parameters.
    pub fn view(&self) -> ScreenView<'_> {
        derive_view(&self.source, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Bounds;

    fn rec(code: &str, name: &str, depth: f64, handle: f64, vol: f64) -> Record {
        Record {
            code: code.to_string(),
            name: name.to_string(),
            price: 100.0,
            detection_date: "2024-01-01".to_string(),
            cup_depth: depth,
            handle_days: handle,
            volume_ratio: vol,
        }
    }

    fn pair() -> Vec<Record> {
        vec![
            rec("A", "Alpha", 10.0, 5.0, 1.2),
            rec("B", "Beta", 50.0, 20.0, 3.0),
        ]
    }

    fn codes(view: &ScreenView<'_>) -> Vec<String> {
        view.iter().map(|r| r.code.clone()).collect()
    }

    #[test]
    fn default_params_show_everything() {
        let source = pair();
        let view = derive_view(&source, &ScreenParams::default());
        assert_eq!(codes(&view), vec!["A", "B"]);
        assert_eq!(view.total(), 2);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn depth_filter_example() {
        let source = pair();
        let conditions = RangeConditions::default()
            .with(Field::CupDepth, Bounds::new(0.0, 20.0))
            .unwrap();
        let view = derive_view(&source, &ScreenParams::new().conditions(conditions));
        assert_eq!(codes(&view), vec!["A"]);
        assert_eq!(view.total(), 2);
    }

    #[test]
    fn search_example() {
        let source = pair();
        let view = derive_view(&source, &ScreenParams::new().query("b"));
        assert_eq!(codes(&view), vec!["B"]);
    }

    #[test]
    fn session_click_cycle() {
        let mut screener = Screener::new(pair());

        screener.select_sort(Field::CupDepth);
        assert_eq!(codes(&screener.view()), vec!["A", "B"]);

        screener.select_sort(Field::CupDepth);
        assert_eq!(codes(&screener.view()), vec!["B", "A"]);

        let state = screener.select_sort(Field::CupDepth);
        assert_eq!(state, SortState::Unsorted);
        assert_eq!(codes(&screener.view()), vec!["A", "B"]);
    }

    #[test]
    fn session_reset() {
        let mut screener = Screener::new(pair());
        screener.set_query("zzz");
        screener.select_sort(Field::Name);
        assert!(screener.view().is_empty());

        screener.reset();
        assert_eq!(screener.params(), &ScreenParams::default());
        assert_eq!(screener.view().len(), 2);
    }

    #[test]
    fn source_is_untouched() {
        let source = pair();
        let before = source.clone();
        let params = ScreenParams::new()
            .query("a")
            .sort(SortState::desc(Field::CupDepth));
        let _ = derive_view(&source, &params);
        assert_eq!(source, before);
    }

    #[test]
    fn reapplying_is_idempotent() {
        let source = pair();
        let params = ScreenParams::new().sort(SortState::desc(Field::VolumeRatio));
        let once = derive_view(&source, &params);
        let twice = params.apply(once.records());
        assert_eq!(once.records(), twice.as_slice());
    }

    #[test]
    fn apply_matches_derive_view() {
        let source = vec![
            rec("A", "Alpha", 10.0, 5.0, 1.2),
            rec("B", "Beta", 50.0, 20.0, 3.0),
            rec("C", "Gamma", 15.0, 7.0, 2.0),
            rec("D", "Delta", 18.0, 40.0, 0.9),
        ];
        let conditions = RangeConditions::default()
            .with(Field::HandleDays, Bounds::new(0.0, 30.0))
            .unwrap();
        let params = ScreenParams::new()
            .conditions(conditions)
            .query("A")
            .sort(SortState::desc(Field::CupDepth));

        let view = derive_view(&source, &params);
        let refs: Vec<&Record> = source.iter().collect();
        let applied = params.apply(&refs);

        assert_eq!(codes(&view), vec!["B", "C", "A"]);
        assert_eq!(view.records(), applied.as_slice());
    }
}
