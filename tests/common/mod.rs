#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use scout::error::TransportError;
use scout::scrapers::types::{HttpRequest, HttpResponse};
use scout::scrapers::HttpFetcher;

/// Answers every request with the same canned result and remembers requests
pub struct StubFetcher {
    status: u16,
    body: Result<String, String>,
    fail: Option<String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubFetcher {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: Ok(body.to_string()),
            fail: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            status: 0,
            body: Ok(String::new()),
            fail: Some(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Status line arrives, then the body read breaks off
    pub fn unreadable(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Err(message.to_string()),
            fail: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for StubFetcher {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match &self.fail {
            Some(message) => Err(TransportError {
                message: message.clone(),
                timed_out: message.contains("timed out"),
            }),
            None => Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            }),
        }
    }
}

/// One `li.ad-listitem` as served by the result page
pub fn ad_item(id: Option<&str>, title: &str, price: &str, location: &str, promoted: bool) -> String {
    let class = if promoted {
        "ad-listitem is-topad badge-topad"
    } else {
        "ad-listitem lazyload-item"
    };
    let id_attr = id
        .map(|id| format!(r#" data-adid="{id}""#))
        .unwrap_or_default();
    format!(
        r#"<li class="{class}">
  <article class="aditem"{id_attr} data-href="/s-anzeige/x/{title}">
    <div class="aditem-image"></div>
    <div class="aditem-main">
      <div class="aditem-main--top">
        <div class="aditem-main--top--left">
          <i class="icon icon-small icon-pin"></i>
          {location}
        </div>
        <div class="aditem-main--top--right">Heute, 10:00</div>
      </div>
      <div class="aditem-main--middle">
        <h2 class="text-module-begin">
          <a class="ellipsis" href="/s-anzeige/{title}/{id}">{title}</a>
        </h2>
        <div class="aditem-main--middle--price-shipping">
          <p class="aditem-main--middle--price-shipping--price">
            {price}
          </p>
        </div>
      </div>
    </div>
  </article>
</li>"#,
        id = id.unwrap_or("none"),
    )
}

pub fn result_page(items: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="de"><head><title>Kleinanzeigen</title></head>
<body>
  <div id="srchrslt-content">
    <ul id="srchrslt-adtable" class="itemlist ad-list lazyloadable">
      {}
    </ul>
  </div>
</body></html>"#,
        items.join("\n")
    )
}
