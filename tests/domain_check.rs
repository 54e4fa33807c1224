use std::sync::atomic::{AtomicUsize, Ordering};

use insta::assert_snapshot;
use oxrdf::{vocab::rdf, BlankNode, Graph, Literal, NamedNode, NamedNodeRef, Triple};
use rdfs_reasoner::{
    vocabulary::namespaces::owl, Class, DomainCheckOptions, Error, InMemoryVocabulary, Iri,
    Property, PropertyKind, Queryable, Reasoner, Resource, Term,
};
use rstest::{fixture, rstest};

fn iri(text: &str) -> Iri {
    Iri::new(format!("https://example.org/{text}")).expect("valid iri")
}

fn node(text: &str) -> NamedNode {
    iri(text).as_named_node().into_owned()
}

fn property(name: &str) -> Term {
    Term::property(iri(name), PropertyKind::Object)
}

fn typed(graph: &mut Graph, subject: NamedNode, class: impl Into<oxrdf::Term>) {
    graph.insert(&Triple::new(subject, rdf::TYPE.into_owned(), class));
}

/// Store answering every lookup with the same types, counting the lookups.
struct CountingStore {
    types: Vec<NamedNode>,
    lookups: AtomicUsize,
}

impl CountingStore {
    fn new(types: &[&str]) -> Self {
        Self {
            types: types.iter().map(|name| node(name)).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Queryable for CountingStore {
    fn objects(&self, _subject: &Resource, predicate: NamedNodeRef<'_>) -> Vec<oxrdf::Term> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if predicate != rdf::TYPE {
            return Vec::new();
        }
        self.types.iter().cloned().map(oxrdf::Term::from).collect()
    }
}

#[fixture]
fn reasoner() -> Reasoner<InMemoryVocabulary> {
    let mut vocabulary = InMemoryVocabulary::new();
    vocabulary
        .add_class(Class::new(Iri::from(owl::THING)))
        .expect("thing");
    vocabulary.add_class(Class::new(iri("Animal"))).expect("animal");
    let mut dog = Class::new(iri("Dog"));
    dog.add_parent(iri("Animal"));
    vocabulary.add_class(dog).expect("dog");
    vocabulary.add_class(Class::new(iri("Agent"))).expect("agent");
    let mut person = Class::new(iri("Person"));
    person.add_parent(iri("Agent"));
    vocabulary.add_class(person).expect("person");

    let properties = [
        Property::new(iri("noDomain"), PropertyKind::Object),
        Property::new(iri("emptyDomain"), PropertyKind::Object).with_domains(Vec::new()),
        Property::new(iri("thingDomain"), PropertyKind::Object)
            .with_domains([Iri::from(owl::THING)]),
        Property::new(iri("barks"), PropertyKind::Object).with_domains([iri("Dog")]),
        Property::new(iri("legs"), PropertyKind::Object).with_domains([iri("Animal")]),
        Property::new(iri("owner"), PropertyKind::Object)
            .with_domains([iri("Animal"), iri("Person")]),
        Property::new(iri("agentOnly"), PropertyKind::Object)
            .with_domains([Iri::from(owl::THING), iri("Agent")]),
    ];
    for property in properties {
        vocabulary.add_property(property).expect("property");
    }

    Reasoner::new(vocabulary)
}

#[fixture]
fn graph() -> Graph {
    let mut graph = Graph::new();
    typed(&mut graph, node("rex"), node("Dog"));
    typed(&mut graph, node("alice"), node("Person"));
    typed(&mut graph, node("ghost"), node("Unknown"));
    typed(&mut graph, node("ghost"), Literal::new_simple_literal("Dog"));
    graph.insert(&Triple::new(
        BlankNode::new("stray").expect("blank node"),
        rdf::TYPE.into_owned(),
        node("Dog"),
    ));
    graph
}

#[rstest]
#[case::no_domain_attribute("noDomain", "alice", true)]
#[case::empty_domain("emptyDomain", "alice", true)]
#[case::only_thing("thingDomain", "alice", true)]
#[case::direct_type("barks", "rex", true)]
#[case::entailed_type("legs", "rex", true)]
#[case::missing_domain("barks", "alice", false)]
#[case::every_domain_required("owner", "rex", false)]
#[case::thing_ignored_among_others("agentOnly", "alice", true)]
#[case::untyped_resource("barks", "nobody", true)]
#[case::unresolvable_types("barks", "ghost", true)]
fn checks_domains_against_stored_types(
    reasoner: Reasoner<InMemoryVocabulary>,
    graph: Graph,
    #[case] prop: &str,
    #[case] resource: &str,
    #[case] expected: bool,
) {
    let acceptable = reasoner
        .is_domain_acceptable(
            &property(prop),
            &Resource::from(iri(resource)),
            &graph,
            &DomainCheckOptions::default(),
        )
        .expect("domain check");
    assert_eq!(acceptable, expected);
}

#[rstest]
#[case::superset_of_domains("legs", &["Animal", "Dog"], true)]
#[case::all_domains_present("owner", &["Animal", "Person", "Agent"], true)]
#[case::one_domain_missing("owner", &["Animal"], false)]
#[case::no_types("barks", &[], true)]
fn supplied_types_replace_the_store(
    reasoner: Reasoner<InMemoryVocabulary>,
    #[case] prop: &str,
    #[case] types: &[&str],
    #[case] expected: bool,
) {
    // The store says nothing about the resource: only the supplied types count.
    let options =
        DomainCheckOptions::with_entailed_types(types.iter().map(|name| Term::class(iri(name))));
    let acceptable = reasoner
        .is_domain_acceptable(
            &property(prop),
            &Resource::from(iri("rex")),
            &Graph::new(),
            &options,
        )
        .expect("domain check");
    assert_eq!(acceptable, expected);
}

#[rstest]
fn supplied_types_skip_the_store_lookup(reasoner: Reasoner<InMemoryVocabulary>) {
    // The store claims Person, which lacks the Animal domain of `legs`.
    let store = CountingStore::new(&["Person"]);
    let rex = Resource::from(iri("rex"));

    let supplied = DomainCheckOptions::with_entailed_types([Term::class(iri("Animal"))]);
    assert!(reasoner
        .is_domain_acceptable(&property("legs"), &rex, &store, &supplied)
        .expect("domain check"));
    assert_eq!(store.lookups(), 0);

    assert!(!reasoner
        .is_domain_acceptable(&property("legs"), &rex, &store, &DomainCheckOptions::default())
        .expect("domain check"));
    assert_eq!(store.lookups(), 1);
}

#[rstest]
fn blank_resources_are_checked(reasoner: Reasoner<InMemoryVocabulary>, graph: Graph) {
    let stray = Resource::from(BlankNode::new("stray").expect("blank node"));
    let options = DomainCheckOptions::default();

    assert!(reasoner
        .is_domain_acceptable(&property("legs"), &stray, &graph, &options)
        .expect("domain check"));
    assert!(!reasoner
        .is_domain_acceptable(&property("owner"), &stray, &graph, &options)
        .expect("domain check"));
}

#[rstest]
fn entails_types_from_the_store(reasoner: Reasoner<InMemoryVocabulary>, graph: Graph) {
    let types = reasoner
        .entailed_types(&Resource::from(iri("rex")), &graph)
        .expect("types");
    assert_eq!(
        types.iter().map(Term::iri).cloned().collect::<Vec<_>>(),
        vec![iri("Dog"), iri("Animal")]
    );

    let types = reasoner
        .entailed_types(&Resource::from(iri("ghost")), &graph)
        .expect("types");
    assert!(types.is_empty());
}

#[rstest]
fn only_properties_have_domains(reasoner: Reasoner<InMemoryVocabulary>, graph: Graph) {
    let err = reasoner
        .is_domain_acceptable(
            &Term::class(iri("Dog")),
            &Resource::from(iri("rex")),
            &graph,
            &DomainCheckOptions::default(),
        )
        .expect_err("classes have no domain");
    assert!(matches!(err, Error::NotApplicable { operation: "domain", .. }));
    assert_snapshot!(err.to_string(), @"term `https://example.org/Dog` can't entail domain");
}
