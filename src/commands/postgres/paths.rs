use crate::constants::DUMP_ROOT;

/// `/root/db-dumps/<dbname>/<name><extension>`, normalized
pub fn dump_path(dbname: &str, name: &str, extension: &str) -> String {
    normalize_posix(&format!("{}/{}/{}{}", DUMP_ROOT, dbname, name, extension))
}

pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

/// Collapse repeated separators, `.` and `..` segments of an absolute path
fn normalize_posix(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
