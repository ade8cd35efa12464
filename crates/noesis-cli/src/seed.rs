//! Bundled demo dataset.
//!
//! Seeds the three domain stores with a small knowledge base so the CLI
//! works out of the box: concepts with searchable descriptions in the
//! vector stores, and the people/ideas relationship network in the
//! property graphs.

use std::collections::BTreeMap;
use std::sync::Arc;

use noesis::{
    Domain, DomainRegistry, EmbeddingProvider, GraphEdge, GraphNode, HashingEmbedder, Result,
    VectorRecord,
};
use noesis_store::{MemoryGraphStore, MemoryVectorStore};

/// `(id, name, description)` rows for a domain's vector store.
type ConceptRow = (&'static str, &'static str, &'static str);

/// `(id, name, label)` graph nodes and `(from, relation, to)` edges.
type NodeRow = (&'static str, &'static str, &'static str);
type EdgeRow = (&'static str, &'static str, &'static str);

const SCIENCE_CONCEPTS: &[ConceptRow] = &[
    (
        "quantum_mechanics",
        "Quantum Mechanics",
        "quantum mechanics wave functions particles superposition physics",
    ),
    (
        "thermodynamics",
        "Thermodynamics",
        "thermodynamics heat energy entropy physical systems",
    ),
    (
        "evolution",
        "Evolution",
        "evolution natural selection species adaptation biology",
    ),
    (
        "molecular_biology",
        "Molecular Biology",
        "molecular biology dna proteins cells biological molecules",
    ),
    (
        "organic_chemistry",
        "Organic Chemistry",
        "organic chemistry carbon compounds molecules chemical bonds atoms",
    ),
    (
        "biochemistry",
        "Biochemistry",
        "biochemistry metabolism enzymes chemical reactions living organisms",
    ),
    (
        "genetics",
        "Genetics",
        "genetics heredity genes dna inheritance traits",
    ),
    (
        "electromagnetism",
        "Electromagnetism",
        "electromagnetism electric magnetic fields light radiation",
    ),
];

const SCIENCE_NODES: &[NodeRow] = &[
    ("quantum_mechanics", "Quantum Mechanics", "Concept"),
    ("thermodynamics", "Thermodynamics", "Concept"),
    ("evolution", "Evolution", "Concept"),
    ("molecular_biology", "Molecular Biology", "Concept"),
    ("organic_chemistry", "Organic Chemistry", "Concept"),
    ("biochemistry", "Biochemistry", "Concept"),
    ("genetics", "Genetics", "Concept"),
    ("electromagnetism", "Electromagnetism", "Concept"),
    ("einstein", "Einstein", "Scientist"),
    ("darwin", "Darwin", "Scientist"),
    ("curie", "Curie", "Scientist"),
    ("feynman", "Feynman", "Scientist"),
    ("crick", "Crick", "Scientist"),
];

const SCIENCE_EDGES: &[EdgeRow] = &[
    ("einstein", "PIONEERED", "quantum_mechanics"),
    ("darwin", "PIONEERED", "evolution"),
    ("curie", "CONTRIBUTED_TO", "organic_chemistry"),
    ("feynman", "PIONEERED", "quantum_mechanics"),
    ("crick", "PIONEERED", "molecular_biology"),
    ("quantum_mechanics", "INFLUENCES", "molecular_biology"),
    ("evolution", "CONNECTS_TO", "genetics"),
    ("molecular_biology", "CONNECTS_TO", "biochemistry"),
    ("organic_chemistry", "ENABLES", "biochemistry"),
    ("thermodynamics", "UNDERLIES", "biochemistry"),
];

const TECHNOLOGY_CONCEPTS: &[ConceptRow] = &[
    (
        "machine_learning",
        "Machine Learning",
        "machine learning models training data predictions algorithms",
    ),
    (
        "deep_learning",
        "Deep Learning",
        "deep learning neural networks layers gradient descent",
    ),
    (
        "transformers",
        "Transformers",
        "transformers attention language models embeddings",
    ),
    (
        "vector_databases",
        "Vector Databases",
        "vector databases similarity search embeddings nearest neighbor",
    ),
    (
        "kubernetes",
        "Kubernetes",
        "kubernetes containers orchestration clusters deployment",
    ),
    (
        "graphql",
        "GraphQL",
        "graphql query language apis schemas resolvers",
    ),
    (
        "webassembly",
        "WebAssembly",
        "webassembly portable bytecode sandboxed execution browsers",
    ),
    (
        "rust",
        "Rust",
        "rust systems programming memory safety performance",
    ),
];

const TECHNOLOGY_NODES: &[NodeRow] = &[
    ("machine_learning", "Machine Learning", "Technology"),
    ("deep_learning", "Deep Learning", "Technology"),
    ("transformers", "Transformers", "Technology"),
    ("vector_databases", "Vector Databases", "Technology"),
    ("kubernetes", "Kubernetes", "Technology"),
    ("graphql", "GraphQL", "Technology"),
    ("webassembly", "WebAssembly", "Technology"),
    ("rust", "Rust", "Technology"),
    ("openai", "OpenAI", "Organization"),
    ("google", "Google", "Organization"),
    ("anthropic", "Anthropic", "Organization"),
    ("cncf", "CNCF", "Organization"),
];

const TECHNOLOGY_EDGES: &[EdgeRow] = &[
    ("machine_learning", "PARENT_OF", "deep_learning"),
    ("deep_learning", "ENABLES", "transformers"),
    ("transformers", "POWERS", "vector_databases"),
    ("rust", "IMPLEMENTS", "webassembly"),
    ("kubernetes", "ORCHESTRATES", "vector_databases"),
    ("graphql", "QUERIES", "vector_databases"),
    ("openai", "PIONEERED", "transformers"),
    ("google", "INVENTED", "transformers"),
    ("anthropic", "ADVANCES", "machine_learning"),
    ("cncf", "MAINTAINS", "kubernetes"),
];

const PHILOSOPHY_CONCEPTS: &[ConceptRow] = &[
    (
        "utilitarianism",
        "Utilitarianism",
        "utilitarianism greatest happiness consequences ethics morality",
    ),
    (
        "deontology",
        "Deontology",
        "deontology duty moral rules categorical imperative ethics",
    ),
    (
        "existentialism",
        "Existentialism",
        "existentialism freedom meaning authenticity absurdity",
    ),
    (
        "empiricism",
        "Empiricism",
        "empiricism knowledge experience senses observation",
    ),
    (
        "rationalism",
        "Rationalism",
        "rationalism reason innate ideas deduction knowledge",
    ),
    (
        "phenomenology",
        "Phenomenology",
        "phenomenology consciousness experience intentionality perception",
    ),
    (
        "pragmatism",
        "Pragmatism",
        "pragmatism practical consequences truth usefulness belief",
    ),
    (
        "virtue_ethics",
        "Virtue Ethics",
        "virtue ethics character flourishing excellence habits",
    ),
];

const PHILOSOPHY_NODES: &[NodeRow] = &[
    ("utilitarianism", "Utilitarianism", "School"),
    ("deontology", "Deontology", "School"),
    ("existentialism", "Existentialism", "School"),
    ("empiricism", "Empiricism", "School"),
    ("rationalism", "Rationalism", "School"),
    ("phenomenology", "Phenomenology", "School"),
    ("pragmatism", "Pragmatism", "School"),
    ("virtue_ethics", "Virtue Ethics", "School"),
    ("kant", "Kant", "Philosopher"),
    ("nietzsche", "Nietzsche", "Philosopher"),
    ("sartre", "Sartre", "Philosopher"),
    ("hume", "Hume", "Philosopher"),
    ("mill", "Mill", "Philosopher"),
    ("aristotle", "Aristotle", "Philosopher"),
    ("husserl", "Husserl", "Philosopher"),
];

const PHILOSOPHY_EDGES: &[EdgeRow] = &[
    ("kant", "FOUNDED", "deontology"),
    ("sartre", "DEVELOPED", "existentialism"),
    ("hume", "CHAMPIONED", "empiricism"),
    ("mill", "REFINED", "utilitarianism"),
    ("aristotle", "ORIGINATED", "virtue_ethics"),
    ("husserl", "CREATED", "phenomenology"),
    ("nietzsche", "INFLUENCED", "existentialism"),
    ("deontology", "OPPOSES", "utilitarianism"),
    ("empiricism", "DEBATES", "rationalism"),
    ("existentialism", "BUILDS_ON", "phenomenology"),
    ("pragmatism", "SYNTHESIZES", "empiricism"),
];

/// Exemplar intents for the router, one curated set per domain.
pub fn demo_exemplars() -> BTreeMap<Domain, Vec<String>> {
    let mut map = BTreeMap::new();
    map.insert(
        Domain::Science,
        phrases(&[
            "how do atoms form chemical bonds",
            "explain quantum mechanics and wave functions",
            "what drives evolution and natural selection",
            "how does dna carry genetic information",
            "what is entropy in thermodynamics",
        ]),
    );
    map.insert(
        Domain::Technology,
        phrases(&[
            "how do neural networks learn from data",
            "deploying containers with kubernetes",
            "what are vector databases used for",
            "how do transformers process language",
            "writing fast and safe systems code",
        ]),
    );
    map.insert(
        Domain::Philosophy,
        phrases(&[
            "what makes an action morally right",
            "the nature of knowledge and experience",
            "existentialism and the meaning of life",
            "duty versus consequences in ethics",
            "how do we know what is true",
        ]),
    );
    map
}

/// Build the demo registry: every domain seeded with its concept
/// vectors and relationship graph.
pub async fn demo_registry(embedder: &HashingEmbedder) -> Result<Arc<DomainRegistry>> {
    let registry = DomainRegistry::builder()
        .register(
            Domain::Science,
            Arc::new(vector_store(embedder, SCIENCE_CONCEPTS).await?),
            Arc::new(graph_store(SCIENCE_NODES, SCIENCE_EDGES)),
        )
        .register(
            Domain::Technology,
            Arc::new(vector_store(embedder, TECHNOLOGY_CONCEPTS).await?),
            Arc::new(graph_store(TECHNOLOGY_NODES, TECHNOLOGY_EDGES)),
        )
        .register(
            Domain::Philosophy,
            Arc::new(vector_store(embedder, PHILOSOPHY_CONCEPTS).await?),
            Arc::new(graph_store(PHILOSOPHY_NODES, PHILOSOPHY_EDGES)),
        )
        .build()?;
    Ok(Arc::new(registry))
}

fn phrases(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

async fn vector_store(
    embedder: &HashingEmbedder,
    concepts: &[ConceptRow],
) -> Result<MemoryVectorStore> {
    let mut store = MemoryVectorStore::new(embedder.dimension());
    for (id, name, description) in concepts {
        let vector = embedder.embed(&format!("{name} {description}")).await?;
        store.insert(
            VectorRecord::new(*id, vector)
                .with_metadata("name", *name)
                .with_metadata("description", *description),
        )?;
    }
    Ok(store)
}

fn graph_store(nodes: &[NodeRow], edges: &[EdgeRow]) -> MemoryGraphStore {
    let mut store = MemoryGraphStore::new();
    for (id, name, label) in nodes {
        store.add_node(
            GraphNode::new(*id)
                .with_label(*label)
                .with_property("name", *name),
        );
    }
    for (from, relation, to) in edges {
        store.add_edge(GraphEdge::new(*from, *to, *relation));
    }
    store
}
