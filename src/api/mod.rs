use rocket::Route;

mod ballot;
mod common;
mod login;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(login::routes());
    routes.extend(ballot::routes());
    routes
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rocket::figment::Figment;
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;

    use crate::build_from;

    fn test_figment(election: &str) -> Figment {
        let roster: HashMap<&str, &str> =
            HashMap::from([("alice@example.org", "1234"), ("bob@example.org", "5678")]);
        Figment::from(rocket::Config::debug_default())
            .merge(("hash_salt", "s"))
            .merge(("election", election))
            .merge(("session_ttl", 900))
            .merge(("roster", roster))
    }

    fn client(election: &str) -> Client {
        Client::tracked(build_from(test_figment(election))).expect("valid rocket instance")
    }

    fn login(client: &Client, email: &str, code: &str) -> Status {
        client
            .post("/login")
            .header(ContentType::JSON)
            .body(format!(
                r#"{{"email": "{email}", "membership_code": "{code}"}}"#
            ))
            .dispatch()
            .status()
    }

    #[test]
    fn full_single_choice_flow() {
        let client = client("accounting");
        assert_eq!(login(&client, "alice@example.org", "1234"), Status::Ok);

        let response = client
            .post("/ballot/select")
            .header(ContentType::JSON)
            .body(r#""Godkendt""#)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let response = client.post("/ballot/confirm").dispatch();
        assert_eq!(response.status(), Status::Ok);

        // The session is destroyed with the commit.
        let response = client.post("/ballot/confirm").dispatch();
        assert_eq!(response.status(), Status::Unauthorized);

        // And the identity cannot vote twice.
        assert_eq!(login(&client, "alice@example.org", "1234"), Status::Conflict);
    }

    #[test]
    fn full_multi_choice_flow() {
        let client = client("supplementary");
        assert_eq!(login(&client, "bob@example.org", "5678"), Status::Ok);

        // Malformed selections are rejected without losing the session.
        let response = client
            .post("/ballot/select")
            .header(ContentType::JSON)
            .body("[]")
            .dispatch();
        assert_eq!(response.status(), Status::UnprocessableEntity);

        let response = client
            .post("/ballot/select")
            .header(ContentType::JSON)
            .body(r#"["1", "2", "1"]"#)
            .dispatch();
        assert_eq!(response.status(), Status::UnprocessableEntity);

        let response = client
            .post("/ballot/select")
            .header(ContentType::JSON)
            .body(r#"["1", "3"]"#)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        // Change of heart, then a final selection.
        let response = client.post("/ballot/revise").dispatch();
        assert_eq!(response.status(), Status::Ok);

        let response = client
            .post("/ballot/select")
            .header(ContentType::JSON)
            .body(r#"["2"]"#)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let response = client.post("/ballot/confirm").dispatch();
        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn bad_credentials_are_indistinguishable() {
        let client = client("accounting");

        let unknown = client
            .post("/login")
            .header(ContentType::JSON)
            .body(r#"{"email": "carol@example.org", "membership_code": "1234"}"#)
            .dispatch();
        assert_eq!(unknown.status(), Status::Unauthorized);
        let unknown_body = unknown.into_string();

        let wrong_code = client
            .post("/login")
            .header(ContentType::JSON)
            .body(r#"{"email": "alice@example.org", "membership_code": "9999"}"#)
            .dispatch();
        assert_eq!(wrong_code.status(), Status::Unauthorized);
        assert_eq!(unknown_body, wrong_code.into_string());
    }

    #[test]
    fn ballot_routes_require_a_session() {
        let client = client("accounting");
        for route in ["/ballot/select", "/ballot/revise", "/ballot/confirm"] {
            let request = if route == "/ballot/select" {
                client.post(route).header(ContentType::JSON).body(r#""Godkendt""#)
            } else {
                client.post(route)
            };
            assert_eq!(request.dispatch().status(), Status::Unauthorized);
        }
    }

    #[test]
    fn logout_abandons_the_session() {
        let client = client("accounting");
        assert_eq!(login(&client, "alice@example.org", "1234"), Status::Ok);

        let response = client.post("/logout").dispatch();
        assert_eq!(response.status(), Status::Ok);

        // No ballot was recorded, so logging in again is allowed.
        assert_eq!(login(&client, "alice@example.org", "1234"), Status::Ok);
    }

    #[test]
    fn election_description_is_public() {
        let client = client("accounting");
        let response = client.get("/election").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().unwrap();
        assert!(body.contains("Regnskab 2025"));
        assert!(body.contains("Godkendt"));
    }
}
