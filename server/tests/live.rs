//! Drive the server over real HTTP.
//!
//! # Design
//! Starts the server on a random port in a background thread, then talks to
//! it with ureq the way a browser running htmx would: form posts, PUT/DELETE
//! without bodies, and the `HX-Trigger` header on the way back.

use std::sync::Arc;

use todo_htmx_core::{seed_demo, InMemoryContentStore};
use todo_htmx_server::AppState;

struct Reply {
    status: u16,
    trigger: Option<String>,
    body: String,
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn reply(mut response: ureq::http::Response<ureq::Body>) -> Reply {
    let trigger = response
        .headers()
        .get("hx-trigger")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Reply {
        status: response.status().as_u16(),
        trigger,
        body: response.body_mut().read_to_string().unwrap_or_default(),
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let store = Arc::new(InMemoryContentStore::new());
    seed_demo(&store).unwrap();
    let state = AppState::new(store).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_htmx_server::run(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn seeded_demo_round_trip() {
    let base = start_server();
    let agent = agent();

    // Step 1: seeded list has three items; list is id 1, items 2..=4.
    let count = reply(agent.get(&format!("{base}/todos/count")).call().unwrap());
    assert_eq!(count.status, 200);
    assert!(count.body.contains(">3</span>"), "{}", count.body);

    // Step 2: add one.
    let added = reply(
        agent
            .post(&format!("{base}/todos"))
            .content_type("application/x-www-form-urlencoded")
            .send("todo=Call+mum".as_bytes())
            .unwrap(),
    );
    assert_eq!(added.status, 200);
    assert_eq!(added.trigger.as_deref(), Some("todoCountUpdated"));
    assert!(added.body.contains("Call mum"));

    // Step 3: mark the new item (id 5) completed.
    let marked = reply(agent.put(&format!("{base}/todos/5/complete")).send_empty().unwrap());
    assert_eq!(marked.status, 200);
    assert!(marked.trigger.is_none());
    assert!(marked.body.contains("todo completed"));

    // Step 4: the protected seed item (id 4) refuses deletion.
    let refused = reply(agent.delete(&format!("{base}/todos/4")).call().unwrap());
    assert_eq!(refused.status, 500);
    assert_eq!(refused.body, "Something went wrong on the server example");
    assert!(refused.trigger.is_none());

    // Step 5: delete the new item.
    let deleted = reply(agent.delete(&format!("{base}/todos/5")).call().unwrap());
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.trigger.as_deref(), Some("todoCountUpdated"));

    // Step 6: deleting again is not found.
    let gone = reply(agent.delete(&format!("{base}/todos/5")).call().unwrap());
    assert_eq!(gone.status, 404);

    // Step 7: count is back to three.
    let count = reply(agent.get(&format!("{base}/todos/count")).call().unwrap());
    assert!(count.body.contains(">3</span>"), "{}", count.body);
}
