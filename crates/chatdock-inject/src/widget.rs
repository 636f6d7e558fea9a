//! Fixed chat widget content: markup, stylesheet, and client script.

/// The chat widget as a single configuration value.
///
/// Everything the injector writes or splices comes from here, so a themed
/// or rebranded widget is a different `WidgetAssets` value, not a change to
/// the injection logic.
#[derive(Debug, Clone)]
pub struct WidgetAssets {
    /// Element id of the widget container; also the already-injected marker.
    pub container_id: &'static str,

    /// The container markup spliced into each page.
    pub markup: &'static str,

    /// Stylesheet content written to `css_path`.
    pub stylesheet: &'static str,

    /// Script content written to `js_path`.
    pub script: &'static str,

    /// Stylesheet path relative to the site root.
    pub css_path: &'static str,

    /// Script path relative to the site root.
    pub js_path: &'static str,
}

impl WidgetAssets {
    /// Build the full fragment spliced before the closing body tag.
    ///
    /// The fragment references the asset files itself so an injected page
    /// works without any cooperation from the host generator's templates.
    pub fn fragment(&self) -> String {
        format!(
            "<link rel=\"stylesheet\" href=\"/{}\">\n{}\n<script src=\"/{}\"></script>\n",
            self.css_path,
            self.markup.trim(),
            self.js_path
        )
    }
}

impl Default for WidgetAssets {
    fn default() -> Self {
        Self {
            container_id: "chatbot-container",
            markup: WIDGET_MARKUP,
            stylesheet: WIDGET_CSS,
            script: WIDGET_JS,
            css_path: "assets/css/chatbot.css",
            js_path: "assets/js/chatbot.js",
        }
    }
}

const WIDGET_MARKUP: &str = r#"
<div id="chatbot-container">
    <div id="chatbot-header">ChatBot</div>
    <div id="chatbot-messages"></div>
    <input type="text" id="chatbot-input" placeholder="Type your message...">
    <button id="chatbot-send">Send</button>
</div>
"#;

const WIDGET_CSS: &str = r#"#chatbot-container {
    position: fixed;
    bottom: 20px;
    right: 20px;
    width: 300px;
    height: 400px;
    background-color: #f1f1f1;
    border: 1px solid #ccc;
    border-radius: 5px;
    display: flex;
    flex-direction: column;
}
#chatbot-header {
    background-color: #333;
    color: white;
    padding: 10px;
    font-weight: bold;
}
#chatbot-messages {
    flex: 1;
    overflow-y: auto;
    padding: 10px;
}
#chatbot-input {
    padding: 10px;
    border: none;
    border-top: 1px solid #ccc;
}
#chatbot-send {
    padding: 10px;
    background-color: #333;
    color: white;
    border: none;
    cursor: pointer;
}
"#;

const WIDGET_JS: &str = r#"(function() {
  'use strict';

  function sendMessage() {
    var input = document.getElementById('chatbot-input');
    var message = input.value.trim();
    if (message === '') {
      return;
    }

    var messagesDiv = document.getElementById('chatbot-messages');
    messagesDiv.innerHTML += '<p><strong>You:</strong> ' + message + '</p>';
    input.value = '';

    fetch('/chatbot', {
      method: 'POST',
      headers: {
        'Content-Type': 'application/json'
      },
      body: JSON.stringify({ message: message })
    })
    .then(function(response) { return response.json(); })
    .then(function(data) {
      var assistantResponse = data.response || data.error || '(no response)';
      messagesDiv.innerHTML += '<p><strong>Assistant:</strong> ' + assistantResponse + '</p>';
      messagesDiv.scrollTop = messagesDiv.scrollHeight;
    });
  }

  document.getElementById('chatbot-send').addEventListener('click', sendMessage);
  document.getElementById('chatbot-input').addEventListener('keyup', function(event) {
    if (event.keyCode === 13) {
      sendMessage();
    }
  });
})();
"#;
