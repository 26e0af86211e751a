// Shared test helpers: a stub HTTP server and source files built from it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};

/// URL suffix of a page answering 200 with `TEST_BODY`.
pub const PAGE_OK: &str = "page";
/// URL suffix of a page answering 404.
pub const PAGE_NOT_FOUND: &str = "404";
/// URL suffix of a page answering only after `EXTRA_DURATION`.
pub const PAGE_TIMEOUT: &str = "sleep";
/// A line that is not a URI at all.
pub const PAGE_NOT_VALID: &str = "::";

/// Request timeout used by the tests.
pub const WAIT_DURATION: Duration = Duration::from_millis(250);
/// Delay of the slow page; must be longer than `WAIT_DURATION`.
pub const EXTRA_DURATION: Duration = Duration::from_millis(1000);

pub const TEST_BODY: &str = "sometext";

/// One line of the standard test source.
pub struct Case {
    pub suffix: &'static str,
    pub add_prefix: bool,
    pub is_timeout: bool,
    pub want_err: &'static str,
}

pub const CASES: [Case; 4] = [
    Case {
        suffix: PAGE_OK,
        add_prefix: true,
        is_timeout: false,
        want_err: "",
    },
    Case {
        suffix: PAGE_NOT_FOUND,
        add_prefix: true,
        is_timeout: false,
        want_err: "Status is not OK",
    },
    Case {
        suffix: PAGE_NOT_VALID,
        add_prefix: false,
        is_timeout: false,
        want_err: "missing protocol scheme",
    },
    Case {
        suffix: PAGE_TIMEOUT,
        add_prefix: true,
        is_timeout: true,
        want_err: "",
    },
];

/// Address written to the source for `case`.
pub fn address(server: &Server, case: &Case) -> String {
    if case.add_prefix {
        server.url_str(&format!("/{}", case.suffix))
    } else {
        case.suffix.to_string()
    }
}

/// Starts a stub server expecting each standard page `runs` times.
#[allow(dead_code)]
pub fn stub_server(runs: usize) -> Server {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", format!("/{PAGE_OK}")))
            .times(runs..=runs)
            .respond_with(status_code(200).body(TEST_BODY)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", format!("/{PAGE_NOT_FOUND}")))
            .times(runs..=runs)
            .respond_with(status_code(404).body("404\n")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", format!("/{PAGE_TIMEOUT}")))
            .times(runs..=runs)
            .respond_with(delay_and_then(
                EXTRA_DURATION,
                status_code(200).body(TEST_BODY),
            )),
    );
    server
}

/// Writes one line per entry of `CASES` into `dir` and returns the file path.
#[allow(dead_code)]
pub fn fill_source(dir: &Path, server: &Server) -> PathBuf {
    let lines: Vec<String> = CASES.iter().map(|case| address(server, case)).collect();
    write_source(dir, "urls.txt", &lines.join("\n"))
}

/// Writes `content` plus a trailing newline to `dir/name`.
pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("{content}\n")).expect("Failed to write source file");
    path
}
