//! In-memory stand-in for the white list API.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::{Value, json};
use vatpl::core::LookupDate;
use vatpl::registry::{Transport, TransportError};

// KGHM Polska Miedź
pub const ACTIVE_NIP: &str = "692-00-00-013";
// Computer generated, valid checksum, not in the registry
pub const UNKNOWN_NIP: &str = "375-17-84-446";

/// Scripted outcome for the next request.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Fail at the network level.
    Network,
    /// Answer with this body instead of consulting the registry.
    Body(String),
}

/// Answers `/api/search/nip/...` and `/api/search/nips/...` from a fixed
/// table of statuses, rejecting dates after `today` like the real registry.
pub struct FakeRegistry {
    statuses: HashMap<String, String>,
    today: LookupDate,
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self {
            statuses: HashMap::new(),
            today: LookupDate::today(),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Registry knowing KGHM as an active VAT payer.
    pub fn with_kghm() -> Self {
        Self::new().subject("6920000013", "Czynny")
    }

    pub fn subject(mut self, nip: &str, status_vat: &str) -> Self {
        self.statuses.insert(nip.into(), status_vat.into());
        self
    }

    /// Queue outcomes consumed by the next requests, in order.
    pub fn script(self, outcomes: impl IntoIterator<Item = Scripted>) -> Self {
        self.script.lock().unwrap().extend(outcomes);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn subject_json(&self, nip: &str) -> Option<Value> {
        self.statuses.get(nip).map(|status| {
            json!({
                "name": format!("PODMIOT {nip}"),
                "nip": nip,
                "statusVat": status,
                "regon": "390021764",
                "accountNumbers": [],
                "hasVirtualAccounts": false,
                "representatives": [],
                "authorizedClerks": [],
                "partners": []
            })
        })
    }

    fn answer(&self, url: &str) -> Value {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let date = query.strip_prefix("date=").unwrap_or_default();
        if date > self.today.to_string().as_str() {
            return json!({
                "code": "WL-112",
                "message": format!("Data nie może być datą przyszłą ({date})."),
            });
        }

        let resource = path.split("/api/search/").nth(1).unwrap_or_default();
        if let Some(nip) = resource.strip_prefix("nip/") {
            json!({"result": {
                "subject": self.subject_json(nip),
                "requestId": "fake-1",
                "requestDateTime": "07-10-2020 12:00:00",
            }})
        } else if let Some(list) = resource.strip_prefix("nips/") {
            let nips: Vec<&str> = list.split(',').collect();
            if nips.len() > 30 {
                return json!({"code": "WL-118", "message": "Za duża liczba numerów."});
            }
            let subjects: Vec<Value> = nips.iter().filter_map(|n| self.subject_json(n)).collect();
            json!({"result": {"subjects": subjects, "requestId": "fake-2"}})
        } else {
            json!({"code": "WL-190", "message": "Niepoprawne żądanie."})
        }
    }
}

impl Transport for FakeRegistry {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Network) => Err(TransportError::Network("connection reset by peer".into())),
            Some(Scripted::Body(body)) => Ok(body),
            None => Ok(self.answer(url).to_string()),
        }
    }
}

/// Append a valid check digit to a nine digit prefix, if one exists.
pub fn with_check_digit(prefix: u32) -> Option<String> {
    const WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];
    let digits = format!("{prefix:09}");
    let sum: u32 = digits
        .bytes()
        .zip(WEIGHTS)
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();
    let check = sum % 11;
    (check < 10).then(|| format!("{digits}{check}"))
}

/// `count` distinct valid NIPs.
pub fn valid_nips(count: usize) -> Vec<String> {
    (100_000_000..).filter_map(with_check_digit).take(count).collect()
}

pub fn registry_error(code: &str, message: &str) -> Scripted {
    Scripted::Body(json!({"code": code, "message": message}).to_string())
}
