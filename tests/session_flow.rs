//! End-to-end: search through a mock provider, export both modes, read the PNGs back.

use image::ImageFormat;
use repocard::rendering::paint::{LINK_BLUE, WHITE};
use repocard::{
    ClientConfig, ExportMode, ExportPhase, GithubClient, LookupPhase, RenderConfig, Session,
};
use tiny_http::{Header, Response, Server};

const SPOON_KNIFE: &str = r#"{
  "name": "Spoon-Knife",
  "full_name": "octocat/Spoon-Knife",
  "description": "This repo is for demonstration purposes only.",
  "stargazers_count": 12000,
  "forks_count": 150000,
  "language": "HTML",
  "updated_at": "2024-05-01T10:00:00Z",
  "html_url": "https://github.com/octocat/Spoon-Knife"
}"#;

fn start_provider() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let header = "Content-Type: application/json".parse::<Header>().unwrap();
            let response = if request.url() == "/repos/octocat/Spoon-Knife" {
                Response::from_string(SPOON_KNIFE).with_header(header)
            } else {
                Response::from_string(r#"{"message":"Not Found"}"#)
                    .with_status_code(404)
                    .with_header(header)
            };
            let _ = request.respond(response);
        }
    });
    format!("http://{}", addr)
}

fn session(base: &str) -> Session<GithubClient> {
    let client = GithubClient::new(ClientConfig {
        api_base: base.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    })
    .unwrap();
    Session::new(client, RenderConfig::default())
}

/// Decode a PNG into (width, height, RGBA pixels).
fn decode(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png).expect("decode PNG");
    assert_eq!(img.color(), image::ColorType::Rgba8);
    let rgba = img.to_rgba8();
    (rgba.width(), rgba.height(), rgba.into_raw())
}

fn contains_color(pixels: &[u8], rgba: (u8, u8, u8, u8)) -> bool {
    pixels
        .chunks_exact(4)
        .any(|p| (p[0], p[1], p[2], p[3]) == rgba)
}

#[tokio::test]
async fn search_by_url_and_export_both_modes() {
    let base = start_provider();
    let mut session = session(&base);
    session
        .state_mut()
        .set_reference("https://github.com/octocat/Spoon-Knife/");

    let card = session.search().await.expect("card").clone();
    assert_eq!(card.title, "Spoon-Knife");
    assert!(card.to_text().contains("12000 Stars"));
    assert!(card.to_text().contains("Updated May 1, 2024"));
    assert_eq!(session.state().lookup, LookupPhase::Ready);
    assert_eq!(session.state().owner, "octocat");

    let dir = tempfile::tempdir().unwrap();

    let standard = session.export(ExportMode::Standard).expect("standard export");
    let path = standard.write_to(dir.path()).unwrap();
    assert!(path.ends_with("octocat-Spoon-Knife-github-card.png"));
    let (w, h, pixels) = decode(&std::fs::read(&path).unwrap());
    assert_eq!(w, 960);
    assert_eq!(h, standard.height);
    assert!(contains_color(&pixels, LINK_BLUE));
    assert!(contains_color(&pixels, WHITE));
    // the margin around the card is plain white
    assert_eq!(&pixels[..4], &[255, 255, 255, 255]);

    let simple = session.export(ExportMode::Simple).expect("simple export");
    assert_eq!(simple.file_name, "octocat-Spoon-Knife-simple.png");
    let (w, _, _) = decode(&simple.png_data);
    assert_eq!(w, 896);
    assert_eq!(session.state().export, ExportPhase::Done);
}

#[tokio::test]
async fn failed_search_leaves_nothing_to_export() {
    let base = start_provider();
    let mut session = session(&base);
    session.state_mut().set_manual("octocat", "does-not-exist");

    assert!(session.search().await.is_none());
    assert_eq!(session.state().lookup, LookupPhase::Idle);
    assert!(session.state().error.as_deref().unwrap().contains("Not Found"));

    assert!(session.export(ExportMode::Standard).is_none());
    assert_eq!(session.state().export, ExportPhase::Failed);
}
