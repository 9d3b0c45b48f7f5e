//! A small employee directory kept in memory.
//!
//! ```text
//! curl -v http://127.0.0.1:8080/api/employees
//! curl -v -d '{"name":"Ann","department":"R&D"}' http://127.0.0.1:8080/api/employees
//! curl -v http://127.0.0.1:8080/api/employees/1
//! curl -v -X PUT -d '{"name":"Ann","department":"Ops"}' http://127.0.0.1:8080/api/employees/1
//! curl -v -X DELETE http://127.0.0.1:8080/api/employees/1
//! curl -v 'http://127.0.0.1:8080/api/employees/search?q=ann'
//! curl -v http://127.0.0.1:8080/uploads/ann.png
//! ```
//!
//! `PLAIN_HTTP_HOST` and `PLAIN_HTTP_PORT` override the listening address.

use std::sync::{Arc, Mutex};

use plain_web::{Cors, ReadMode, Request, Response, Router, Server, handler_fn};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Serialize, Clone, Debug)]
struct Employee {
    id: u32,
    name: String,
    department: String,
}

#[derive(Deserialize, Debug)]
struct EmployeeInput {
    name: String,
    department: String,
}

#[derive(Debug, Default)]
struct Directory {
    next_id: u32,
    employees: Vec<Employee>,
}

type Shared = Arc<Mutex<Directory>>;

fn json(resp: &mut Response, status: u16, value: &impl Serialize) {
    match serde_json::to_vec(value) {
        Ok(body) => {
            resp.set_status(status);
            resp.set_content(body, mime::APPLICATION_JSON.as_ref());
        }
        Err(e) => error_message(resp, 500, &e.to_string()),
    }
}

fn error_message(resp: &mut Response, status: u16, message: &str) {
    json(resp, status, &serde_json::json!({ "error": message }));
}

fn list(directory: &Shared, resp: &mut Response) {
    let directory = directory.lock().unwrap();
    json(resp, 200, &directory.employees);
}

fn search(directory: &Shared, req: &Request, resp: &mut Response) {
    let query = req.param_value("q").to_lowercase();
    let directory = directory.lock().unwrap();
    let found = directory
        .employees
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&query) || e.department.to_lowercase().contains(&query))
        .collect::<Vec<_>>();
    json(resp, 200, &found);
}

fn get(directory: &Shared, req: &Request, resp: &mut Response) {
    let Ok(id) = req.param_value("id").parse::<u32>() else {
        return error_message(resp, 400, "invalid id");
    };

    let directory = directory.lock().unwrap();
    match directory.employees.iter().find(|e| e.id == id) {
        Some(employee) => json(resp, 200, employee),
        None => error_message(resp, 404, "employee not found"),
    }
}

fn create(directory: &Shared, req: &Request, resp: &mut Response) {
    let input = match serde_json::from_slice::<EmployeeInput>(req.body()) {
        Ok(input) => input,
        Err(e) => return error_message(resp, 400, &e.to_string()),
    };

    let mut directory = directory.lock().unwrap();
    directory.next_id += 1;
    let employee = Employee { id: directory.next_id, name: input.name, department: input.department };
    directory.employees.push(employee.clone());
    json(resp, 201, &employee);
}

fn update(directory: &Shared, req: &Request, resp: &mut Response) {
    let Ok(id) = req.param_value("id").parse::<u32>() else {
        return error_message(resp, 400, "invalid id");
    };
    let input = match serde_json::from_slice::<EmployeeInput>(req.body()) {
        Ok(input) => input,
        Err(e) => return error_message(resp, 400, &e.to_string()),
    };

    let mut directory = directory.lock().unwrap();
    match directory.employees.iter_mut().find(|e| e.id == id) {
        Some(employee) => {
            employee.name = input.name;
            employee.department = input.department;
            json(resp, 200, &*employee);
        }
        None => error_message(resp, 404, "employee not found"),
    }
}

fn delete(directory: &Shared, req: &Request, resp: &mut Response) {
    let Ok(id) = req.param_value("id").parse::<u32>() else {
        return error_message(resp, 400, "invalid id");
    };

    let mut directory = directory.lock().unwrap();
    let before = directory.employees.len();
    directory.employees.retain(|e| e.id != id);
    if directory.employees.len() == before {
        error_message(resp, 404, "employee not found");
    } else {
        json(resp, 200, &serde_json::json!({ "deleted": id }));
    }
}

fn uploads(req: &Request, resp: &mut Response) {
    let name = req.path().trim_start_matches("/uploads/");
    resp.set_content(format!("no stored file named {name}\n"), mime::TEXT_PLAIN.as_ref());
    resp.set_status(404);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let host = std::env::var("PLAIN_HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PLAIN_HTTP_PORT").ok().and_then(|port| port.parse().ok()).unwrap_or(8080);

    let directory: Shared = Arc::default();

    let router = Router::builder()
        .get("/api/employees", {
            let directory = Arc::clone(&directory);
            handler_fn(move |_req: &Request, resp: &mut Response| list(&directory, resp))
        })
        .get("/api/employees/search", {
            let directory = Arc::clone(&directory);
            handler_fn(move |req: &Request, resp: &mut Response| search(&directory, req, resp))
        })
        .get("/api/employees/:id", {
            let directory = Arc::clone(&directory);
            handler_fn(move |req: &Request, resp: &mut Response| get(&directory, req, resp))
        })
        .post("/api/employees", {
            let directory = Arc::clone(&directory);
            handler_fn(move |req: &Request, resp: &mut Response| create(&directory, req, resp))
        })
        .put("/api/employees/:id", {
            let directory = Arc::clone(&directory);
            handler_fn(move |req: &Request, resp: &mut Response| update(&directory, req, resp))
        })
        .delete("/api/employees/:id", {
            let directory = Arc::clone(&directory);
            handler_fn(move |req: &Request, resp: &mut Response| delete(&directory, req, resp))
        })
        .static_prefix("/uploads/", handler_fn(uploads))
        .build();

    info!(%host, port, routes = router.len(), "starting employee directory");

    let server = Server::builder()
        .address(host, port)
        .router(router)
        .read_mode(ReadMode::content_length())
        .cors(Cors::new().allow_headers("Content-Type, Authorization, X-Requested-With"))
        .build()
        .unwrap();

    if let Err(e) = server.listen().await {
        error!(cause = %e, "server stopped");
    }
}
