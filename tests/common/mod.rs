//! Fixture dumps shaped like the profiler's real output.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Options of a profiled, recorded run with the default caches
pub fn recorded_options(array_states: bool, profile_ext: &str) -> Vec<(String, String)> {
    [
        ("javaArgs", ""),
        ("arrayIndexStates", if array_states { "false" } else { "true" }),
        ("objectStates", "false"),
        ("noInstrument", "false"),
        ("profile", "true"),
        ("arrayCacheSize", "16"),
        ("lockCacheSize", "4"),
        ("traces", "false"),
        ("record", "true"),
        ("profileExt", profile_ext),
        ("create", "false"),
        ("args", "[]"),
        ("instrumentFullJDK", "false"),
        ("bytecodeDump", "false"),
        ("verify", "false"),
        ("preVerify", "false"),
        ("frames", "false"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Render a profile dump; `fields` are extra top-level entries
pub fn profile_dump(options: &[(String, String)], fields: &str) -> String {
    let options: Vec<String> = options
        .iter()
        .map(|(k, v)| format!("\"{}\" : \"{}\"", k, v))
        .collect();
    format!("{{\"options\" : {{{}}}, {}}}", options.join(", "), fields)
}

/// Counters of a run with the given cache behaviour
pub fn run_fields(threads: i64, hits: i64, misses: i64) -> String {
    format!(
        "\"threads\" : {threads}, \"frequently communicating stacks\" : 12, \
         \"Premain to fini time\" : 2494627, \"Instrumentation time\" : 99, \
         \"All field reads\" : 600, \"Communicating field reads\" : 40, \
         \"Communicating field read slow path\" : 8, \"All array reads\" : 300, \
         \"Communicating array reads\" : 20, \"Communicating array read slow path\" : 4, \
         \"All acquires\" : 100, \"Communicating acquires\" : 0, \
         \"Communicating acquire slow path\" : 0, \
         \"Array hits\" : {hits}, \"Array misses\" : {misses}, \
         \"Communicating stack depths\" : {{1 : 45, 2 : 27}}, \
         \"Length in methods of stack segments\" : {{1 : 72}}, \
         \"Segments on a communicating stack\" : {{1 : 36}}, \
         \"Modules used\" : 2, \"Full stack walks\" : 2, \
         \"Total comm nodes in used specs\" : 6, \"Total comm edges in used specs\" : 8, \
         \"Total comm nodes in run\" : 3, \"Total comm edges in run\" : 2, \
         \"Memory peak\" : 44729968"
    )
}

pub fn write_dump(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// A recorded Java Grande run, named the way the profiler names it
pub fn jgf_run(
    dir: &Path,
    bench: &str,
    threads: i64,
    array_states: bool,
    hits: i64,
    misses: i64,
    n: usize,
) -> PathBuf {
    let ext = format!("-{}-threads-prof-{}.py", threads, n);
    let name = format!("JGF{}BenchSizeA{}", bench, ext);
    let text = profile_dump(
        &recorded_options(array_states, &ext),
        &run_fields(threads, hits, misses),
    );
    write_dump(dir, &name, &text)
}

/// A static-stats dump with `methods` methods in one module
pub fn static_dump(dir: &Path, bench: &str, methods: i64, inlined: i64) -> PathBuf {
    let text = format!(
        "{{\"Total methods\" : {{{methods} : 1}}, \"Inlined methods\" : {{{inlined} : 1}}, \
         \"Communication groups\" : {{1 : 3}}, \"Interface groups\" : {{0 : 1}}, \
         \"Group membership annotations\" : {{1 : 2}}, \
         \"Group declaration annotations\" : {{1 : 1}}, \
         \"Non-communicator annotations\" : {{}}, \
         \"Inline annotations\" : {{1 : 1}}, \
         \"Module membership annotations\" : {{0 : 4}}}}"
    );
    write_dump(dir, &format!("{}.py", bench), &text)
}

/// An unprofiled timing run; `instrumented = false` is a plain JVM baseline
pub fn timing_run(
    dir: &Path,
    bench: &str,
    threads: i64,
    instrumented: bool,
    array_states: bool,
    runtime: i64,
    n: usize,
) -> PathBuf {
    let ext = format!("-{}-threads-prof-{}.py", threads, n);
    let mut options = recorded_options(array_states, &ext);
    for (key, value) in options.iter_mut() {
        match key.as_str() {
            "profile" | "record" => *value = "false".to_string(),
            "noInstrument" => *value = (!instrumented).to_string(),
            _ => {}
        }
    }
    let fields = format!("\"Premain to fini time\" : {runtime}, \"Memory peak\" : {runtime}");
    let name = format!("JGF{}BenchSizeA{}", bench, ext);
    write_dump(dir, &name, &profile_dump(&options, &fields))
}
