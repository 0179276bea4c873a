use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use multi_classifier::document::ParseError;
use multi_classifier::{
    CategoryClassifier, ClassifierConfig, ClassifierFactory, DocumentParser, MultiClassifier,
    NgramParser, TokenCounts, TupleOrder,
};
use multi_classifier::types::CategoryName;

#[derive(Debug)]
struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no stub for category {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Scores each document by how many distinct token sequences it has,
/// offset per category so categories are distinguishable.
struct DistinctTokens {
    order: TupleOrder,
    offset: f64,
}

impl CategoryClassifier for DistinctTokens {
    fn tuple_order(&self) -> TupleOrder {
        self.order
    }

    fn classify(&self, tokens: &TokenCounts) -> f64 {
        tokens.len() as f64 + self.offset
    }
}

struct StubFactory {
    orders: HashMap<&'static str, usize>,
}

impl StubFactory {
    fn new(orders: &[(&'static str, usize)]) -> Self {
        Self {
            orders: orders.iter().copied().collect(),
        }
    }
}

impl ClassifierFactory for StubFactory {
    type Error = UnknownCategory;

    fn create(
        &self,
        category: &CategoryName,
        _config: &ClassifierConfig,
    ) -> Result<Box<dyn CategoryClassifier>, UnknownCategory> {
        let order = self
            .orders
            .get(category.as_str())
            .ok_or_else(|| UnknownCategory(category.to_string()))?;
        Ok(Box::new(DistinctTokens {
            order: TupleOrder::new(*order).unwrap(),
            offset: category.as_str().len() as f64 / 100.0,
        }))
    }
}

#[derive(Default)]
struct CountingParser {
    calls: AtomicUsize,
    orders: Mutex<Vec<usize>>,
}

impl DocumentParser for CountingParser {
    fn parse(&self, text: &str, order: TupleOrder) -> Result<TokenCounts, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().unwrap().push(order.get());
        NgramParser.parse(text, order)
    }
}

const TEXT: &str = "the quick brown fox jumps over the lazy dog";

#[test]
fn invariant_scores_are_index_aligned() {
    let factory = StubFactory::new(&[("a", 1), ("bb", 2), ("ccc", 1), ("dddd", 3)]);

    for names in [
        vec!["a"],
        vec!["bb", "a"],
        vec!["dddd", "ccc", "bb", "a"],
        vec!["a", "dddd", "bb"],
    ] {
        let multi = MultiClassifier::build(&names, &ClassifierConfig::v0(), &factory).unwrap();
        let scores = multi.get_scores(TEXT).unwrap();

        assert_eq!(scores.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            assert_eq!(multi.categories()[i].as_str(), *name);
            let order = factory.orders[name];
            let expected = NgramParser
                .parse(TEXT, TupleOrder::new(order).unwrap())
                .unwrap()
                .len() as f64
                + name.len() as f64 / 100.0;
            assert_eq!(scores[i], expected, "score for {name} out of place");
        }
    }
}

#[test]
fn invariant_repeated_calls_are_identical() {
    let factory = StubFactory::new(&[("a", 1), ("bb", 2)]);
    let multi = MultiClassifier::build(&["a", "bb"], &ClassifierConfig::v0(), &factory).unwrap();

    let first = multi.get_scores(TEXT).unwrap();
    for _ in 0..5 {
        assert_eq!(multi.get_scores(TEXT).unwrap(), first);
    }
    assert_eq!(
        multi.get_named_scores(TEXT).unwrap(),
        multi.get_named_scores(TEXT).unwrap()
    );
}

#[test]
fn invariant_one_parse_per_distinct_order() {
    let factory = StubFactory::new(&[("a", 2), ("bb", 1), ("ccc", 2), ("dddd", 2)]);
    let parser = CountingParser::default();
    let multi = MultiClassifier::build(&["a", "bb", "ccc", "dddd"], &ClassifierConfig::v0(), &factory)
        .unwrap()
        .with_parser(&parser);

    assert_eq!(multi.distinct_tuple_orders().len(), 2);

    multi.get_scores(TEXT).unwrap();
    assert_eq!(parser.calls.load(Ordering::SeqCst), 2);
    assert_eq!(*parser.orders.lock().unwrap(), vec![2, 1], "parsed in first-seen order");

    // The cache does not outlive the call.
    multi.get_scores(TEXT).unwrap();
    assert_eq!(parser.calls.load(Ordering::SeqCst), 4);
}

#[test]
fn invariant_shared_order_parses_once() {
    let factory = StubFactory::new(&[("a", 3), ("bb", 3), ("ccc", 3)]);
    let parser = CountingParser::default();
    let multi = MultiClassifier::build(&["a", "bb", "ccc"], &ClassifierConfig::v0(), &factory)
        .unwrap()
        .with_parser(&parser);

    multi.get_named_scores(TEXT).unwrap();
    assert_eq!(parser.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn invariant_tuple_orders_follow_category_order() {
    let factory = StubFactory::new(&[("a", 3), ("bb", 1), ("ccc", 2)]);
    let multi = MultiClassifier::build(&["ccc", "a", "bb"], &ClassifierConfig::v0(), &factory).unwrap();
    let orders: Vec<usize> = multi.tuple_orders().into_iter().map(TupleOrder::get).collect();
    assert_eq!(orders, vec![2, 3, 1]);
}

#[test]
fn invariant_concurrent_calls_agree() {
    let factory = StubFactory::new(&[("a", 1), ("bb", 2), ("ccc", 3)]);
    let multi = MultiClassifier::build(&["a", "bb", "ccc"], &ClassifierConfig::v0(), &factory).unwrap();
    let expected = multi.get_named_scores(TEXT).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| multi.get_named_scores(TEXT).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn invariant_parser_failure_is_surfaced() {
    struct Failing;

    impl DocumentParser for Failing {
        fn parse(&self, _text: &str, order: TupleOrder) -> Result<TokenCounts, ParseError> {
            Err(ParseError::Tokenizer {
                order,
                message: "unsupported script".into(),
            })
        }
    }

    let factory = StubFactory::new(&[("a", 1)]);
    let multi = MultiClassifier::build(&["a"], &ClassifierConfig::v0(), &factory)
        .unwrap()
        .with_parser(Failing);

    let err = multi.get_scores(TEXT).unwrap_err();
    assert!(matches!(err, multi_classifier::ClassifierError::Parse(_)));
    assert_eq!(err.exit_code(), 3);
}
