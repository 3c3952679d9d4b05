//! Static seed catalog of courses and modules.

use serde::{Deserialize, Serialize};

/// A read-only catalog that fresh collections are seeded from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Courses in display order
    pub courses: Vec<CatalogCourse>,
}

/// Catalog entry for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCourse {
    /// Course code
    pub code: String,
    /// Course title
    pub name: String,
    /// Modules in syllabus order
    pub modules: Vec<CatalogModule>,
}

/// Catalog entry for a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogModule {
    /// Module title
    pub name: String,
    /// Scheduled lecture sessions
    pub lectures: u32,
    /// Syllabus topics
    pub topics: String,
}

impl Catalog {
    /// Create a catalog from courses.
    pub fn new(courses: Vec<CatalogCourse>) -> Self {
        Self { courses }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The catalog shipped with the tracker.
    pub fn builtin() -> Self {
        Self::new(vec![
            course("IT3101", "Microprocessor and microcontroller", &[
                (
                    "Introduction to 8085A CPU",
                    2,
                    "Pin description and features, architecture-register organization.",
                ),
                (
                    "8085 Addressing",
                    3,
                    "Different addressing modes and their features, instruction set, instruction cycle, machine cycle, timing diagram.",
                ),
                ("8085 Assembly language programming", 3, "Assembly programming."),
                (
                    "Hardware interfacing",
                    4,
                    "Interfacing memory, peripheral chips (IO mapped IO and Memory mapped IO), interrupts and DMA.",
                ),
                (
                    "16 bit processors: 8086",
                    4,
                    "Architecture, segmented memory cycles, read/write cycle, min/max mode, reset operation, wait state, halt state, hold state, lock operation, interrupt processing.",
                ),
                (
                    "8086 Addressing modes",
                    6,
                    "Software instruction set, string instructions, repeat, segment override, lock prefix, assembly programming.",
                ),
                (
                    "8051 Microcontroller",
                    6,
                    "Architecture, memory management, instruction set, assembly programming.",
                ),
                (
                    "ARM RISC architecture",
                    8,
                    "Memory management, instruction set, assembly programming.",
                ),
                ("Raspberry Pi and Arduino", 6, "Overview and application development."),
            ]),
            course("IT3102", "Operating systems", &[
                (
                    "Introduction",
                    4,
                    "Operating system, evolution, batch-processing, multiprocessing, multiprogramming, timesharing, real-time operations, interrupt handler.",
                ),
                (
                    "Process concepts",
                    4,
                    "Process, synchronization, scheduling, IPC, RPC, hardware requirements, threads.",
                ),
                ("Threads", 2, "Multithreaded model, scheduler activations."),
                (
                    "Scheduling",
                    6,
                    "CPU scheduling: short/medium/long term, non-preemptive and preemptive algorithms.",
                ),
                (
                    "Process synchronization",
                    8,
                    "Critical section, semaphores, classical problems, concurrency.",
                ),
                ("Deadlocks", 5, "Modeling, detection, prevention, avoidance, recovery."),
                (
                    "Memory management",
                    8,
                    "Partitioning, paging, virtual memory, page replacement, segmentation, hardware support.",
                ),
                (
                    "Device management",
                    3,
                    "Scheduling algorithms FCFS, SSTF, SCAN, C-SCAN, LOOK, C-LOOK, device drivers.",
                ),
                (
                    "File management",
                    6,
                    "File concept, directories, file strategies, protection, allocation.",
                ),
                ("Case study", 2, "UNIX/Linux, Windows, Android."),
            ]),
            course("IT3103", "Database management system", &[
                ("Introduction", 4, "Database vs file systems, view of data, languages, users."),
                (
                    "Data models",
                    4,
                    "Network, relational, hierarchical, object oriented, data independence.",
                ),
                ("ER model", 6, "Constraints, keys, ER diagrams, extended E-R, ER→Relational."),
                ("Query languages", 4, "Relational algebra, calculus, SQL, QBE."),
                ("Relational design", 6, "Functional dependency, normal forms, lossless design."),
                (
                    "Storage strategies",
                    4,
                    "Ordered/unordered file, hashing, indexing, B tree, B+ tree.",
                ),
                (
                    "Query processing",
                    4,
                    "Expression evaluation, SELECT/JOIN/PROJECT, optimization.",
                ),
                (
                    "Transaction processing",
                    8,
                    "Schedules, serializability, concurrency control, locks, timestamp, MVCC.",
                ),
                ("Recovery", 2, "Immediate/deferred update, shadow paging."),
                ("Advanced topics", 2, "Web DB, distributed DB, data warehouse, data mining."),
            ]),
            course("IT3104", "Algorithms", &[
                ("Models of computation", 6, "Complexity, asymptotic notations."),
                ("Sorting and searching", 6, "Trees, hashing."),
                ("Advanced data structures", 5, "RB trees, Fibonacci heaps, disjoint sets."),
                ("Lower bound theory", 2, "Lower bounds."),
                ("Optimization problems", 6, "DP, greedy, theory foundations."),
                (
                    "Graph algorithms",
                    6,
                    "Amortized analysis, BFS/DFS, CC, spanning, shortest paths, max flow.",
                ),
                ("Randomized algorithms", 4, "Identity testing, primality, min cut."),
                ("Complexity classes", 6, "P, NP, NP-complete."),
            ]),
            course("IT3105", "Information and coding theory", &[
                ("Introduction", 2, "Data and information, channels."),
                (
                    "Basics of information theory",
                    6,
                    "Entropy, relative entropy, mutual information, capacity.",
                ),
                (
                    "Models of sources/channels/noise",
                    8,
                    "Discrete/continuous sources, BSC, Gaussian channel, AWGN, Markov source.",
                ),
                ("Source and channel coding", 4, "Source coding theorem, channel coding theorem."),
                ("Quantum information theory", 4, "von Neumann entropy, quantum mutual info."),
                (
                    "Coding theory",
                    12,
                    "Block, cyclic, CRC, BCH, Reed-Solomon, Golay, convolutional, LDPC, Viterbi.",
                ),
                ("STC coding", 4, "SISO, MIMO, space-time coding."),
            ]),
        ])
    }
}

fn course(code: &str, name: &str, modules: &[(&str, u32, &str)]) -> CatalogCourse {
    CatalogCourse {
        code: code.to_string(),
        name: name.to_string(),
        modules: modules
            .iter()
            .map(|(name, lectures, topics)| CatalogModule {
                name: name.to_string(),
                lectures: *lectures,
                topics: topics.to_string(),
            })
            .collect(),
    }
}
