use eyre::{Result, WrapErr};
use nlpfetch_lib::config::{ArchiveDef, Config, ResourceDef, default_resources};
use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use zip::write::SimpleFileOptions;

pub const TAGGER_ARCHIVE: &str = "stanford-postagger-2015-01-29.zip";
pub const PARSER_ARCHIVE: &str = "stanford-parser-full-2015-01-29.zip";
pub const PARSER_TOP_LEVEL: &str = "stanford-parser-full-2015-01-29";
pub const GLOVE_ARCHIVE: &str = "glove.840B.300d.zip";
pub const SICK_ARCHIVES: [&str; 3] = [
    "sick_train.zip",
    "sick_trial.zip",
    "sick_test_annotated.zip",
];

/// Builds an in-memory zip; names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let options = SimpleFileOptions::default();
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("add directory entry");
        } else {
            writer.start_file(*name, options).expect("start file entry");
            writer
                .write_all(contents.as_bytes())
                .expect("write file entry");
        }
    }
    writer.finish().expect("finish zip").into_inner()
}

pub fn parser_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("stanford-parser-full-2015-01-29/", ""),
        ("stanford-parser-full-2015-01-29/stanford-parser.jar", "parser"),
        (
            "stanford-parser-full-2015-01-29/stanford-parser-3.5.1-models.jar",
            "models",
        ),
        ("stanford-parser-full-2015-01-29/lexparser.sh", "#!/bin/sh\n"),
    ]
}

/// Archive bodies served by [`FixtureServer`], keyed by file name.
pub fn fixture_archives() -> HashMap<String, Vec<u8>> {
    let mut archives = HashMap::new();
    archives.insert(
        TAGGER_ARCHIVE.to_string(),
        zip_bytes(&[
            ("stanford-postagger-2015-01-29/", ""),
            ("stanford-postagger-2015-01-29/stanford-postagger.jar", "tagger"),
            (
                "stanford-postagger-2015-01-29/models/english-left3words-distsim.tagger",
                "model",
            ),
        ]),
    );
    archives.insert(PARSER_ARCHIVE.to_string(), zip_bytes(&parser_entries()));
    archives.insert(
        GLOVE_ARCHIVE.to_string(),
        zip_bytes(&[("glove.840B.300d.txt", "the 0.418 0.24968 -0.41242\n")]),
    );
    for (archive, member) in SICK_ARCHIVES.iter().zip([
        "SICK_train.txt",
        "SICK_trial.txt",
        "SICK_test_annotated.txt",
    ]) {
        archives.insert(
            archive.to_string(),
            zip_bytes(&[(member, "pair_ID\tsentence_A\tsentence_B\n")]),
        );
    }
    archives
}

/// Minimal HTTP/1.1 server answering `GET /<file name>` from a fixed set of bodies.
pub struct FixtureServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl FixtureServer {
    pub async fn start(routes: HashMap<String, Vec<u8>>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .wrap_err("Failed to bind fixture server")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let requests = requests.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let routes = routes.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        if let Err(err) = serve(stream, &routes, &requests).await {
                            tracing::warn!("Fixture server connection failed: {:#}", err);
                        }
                    });
                }
            })
        };

        Ok(Self {
            base_url,
            requests,
            handle,
        })
    }

    pub fn url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("request log poisoned").len()
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, Vec<u8>>,
    requests: &Mutex<Vec<String>>,
) -> Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    let head = String::from_utf8_lossy(&buffer);
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    requests
        .lock()
        .expect("request log poisoned")
        .push(path.clone());

    match routes.get(path.trim_start_matches('/')) {
        Some(body) => {
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(header.as_bytes()).await?;
            stream.write_all(body).await?;
        }
        None => {
            stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await?;
        }
    }
    stream.shutdown().await?;
    Ok(())
}

/// The built-in resource list with every archive URL pointed at `server`.
pub fn fixture_resources(server: &FixtureServer) -> Vec<ResourceDef> {
    default_resources()
        .into_iter()
        .map(|mut resource| {
            resource.archives = resource
                .archives
                .iter()
                .map(|archive| {
                    let file_name = archive
                        .url
                        .rsplit('/')
                        .next()
                        .expect("archive URL has a file name");
                    ArchiveDef {
                        url: server.url(file_name),
                        expected_size: archive.expected_size,
                    }
                })
                .collect();
            resource
        })
        .collect()
}

/// Creates an empty project tree with `lib/` and `data/` and a config file pointing at `server`.
pub fn setup_test_environment(server: &FixtureServer) -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    std::fs::create_dir_all(temp_dir.path().join("lib"))?;
    std::fs::create_dir_all(temp_dir.path().join("data"))?;

    let config = Config {
        base_dir: Some(temp_dir.path().to_path_buf()),
        resources: fixture_resources(server),
    };
    let config_path = temp_dir.path().join("nlpfetch.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    Ok(temp_dir)
}

/// Relative path to contents for every file under `root`.
pub fn snapshot_tree(root: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(root, &path, out)?;
            } else {
                let relative = path.strip_prefix(root)?.to_string_lossy().into_owned();
                out.insert(relative, std::fs::read(&path)?);
            }
        }
        Ok(())
    }

    let mut snapshot = BTreeMap::new();
    walk(root, root, &mut snapshot)?;
    Ok(snapshot)
}
