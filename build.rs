use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Each checked-in stub next to the proto it was generated from.
const STUBS: &[(&str, &str)] = &[("proto/task/v1/task.proto", "src/generated/task.v1.rs")];

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

fn main() {
    for (proto, stub) in STUBS {
        let (proto, stub) = (Path::new(proto), Path::new(stub));
        println!("cargo:rerun-if-changed={}", proto.display());
        println!("cargo:rerun-if-changed={}", stub.display());

        assert!(
            stub.exists(),
            "{} is missing; regenerate it from {}",
            stub.display(),
            proto.display()
        );

        if let (Some(proto_time), Some(stub_time)) = (modified(proto), modified(stub)) {
            if proto_time > stub_time {
                println!(
                    "cargo:warning={} changed after {} was generated",
                    proto.display(),
                    stub.display()
                );
            }
        }
    }
}
