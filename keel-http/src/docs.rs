//! HTML shells for the documentation pages.
//!
//! The pages are thin loaders for CDN-hosted Swagger UI and ReDoc bundles;
//! the actual rendering happens in the browser. The composer only decides
//! the paths they are served from and the OpenAPI URL they point at.

const SWAGGER_UI_JS: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js";
const SWAGGER_UI_CSS: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css";
const REDOC_JS: &str = "https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js";

/// Renders the Swagger UI page pointing at the given OpenAPI URL.
pub fn swagger_ui_html(
    openapi_url: &str,
    title: &str,
    oauth2_redirect_url: Option<&str>,
    init_oauth: Option<&serde_json::Value>,
) -> String {
    let mut options = format!(
        "        url: '{openapi_url}',\n\
         \x20       dom_id: '#swagger-ui',\n\
         \x20       presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],\n\
         \x20       layout: 'BaseLayout',\n\
         \x20       deepLinking: true,\n"
    );
    if let Some(redirect_url) = oauth2_redirect_url {
        options.push_str(&format!(
            "        oauth2RedirectUrl: window.location.origin + '{redirect_url}',\n"
        ));
    }

    let init_oauth_call = match init_oauth {
        Some(init) => format!("    ui.initOAuth({init})\n"),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20   <meta charset=\"utf-8\"/>\n\
         \x20   <link type=\"text/css\" rel=\"stylesheet\" href=\"{SWAGGER_UI_CSS}\">\n\
         \x20   <title>{title} - Swagger UI</title>\n\
         </head>\n\
         <body>\n\
         \x20   <div id=\"swagger-ui\"></div>\n\
         \x20   <script src=\"{SWAGGER_UI_JS}\"></script>\n\
         \x20   <script>\n\
         \x20   const ui = SwaggerUIBundle({{\n\
         {options}\
         \x20   }})\n\
         {init_oauth_call}\
         \x20   </script>\n\
         </body>\n\
         </html>\n"
    )
}

/// Renders the ReDoc page pointing at the given OpenAPI URL.
pub fn redoc_html(openapi_url: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20   <meta charset=\"utf-8\"/>\n\
         \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         \x20   <title>{title} - ReDoc</title>\n\
         </head>\n\
         <body>\n\
         \x20   <redoc spec-url=\"{openapi_url}\"></redoc>\n\
         \x20   <script src=\"{REDOC_JS}\"></script>\n\
         </body>\n\
         </html>\n"
    )
}

/// Static OAuth2 redirect page completing the Swagger UI auth flow.
///
/// Forwards the authorization response from the query string or fragment
/// back to the opener window, as Swagger UI expects.
pub fn oauth2_redirect_html() -> &'static str {
    r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8"/>
    <title>Swagger UI: OAuth2 Redirect</title>
</head>
<body>
<script>
'use strict';
function run() {
    var oauth2 = window.opener.swaggerUIRedirectOauth2;
    var sentState = oauth2.state;
    var redirectUrl = oauth2.redirectUrl;
    var isValid, qp, arr;

    if (/code|token|error/.test(window.location.hash)) {
        qp = window.location.hash.substring(1);
    } else {
        qp = location.search.substring(1);
    }

    arr = qp.split("&");
    arr.forEach(function (v, i, _arr) { _arr[i] = '"' + v.replace('=', '":"') + '"'; });
    qp = qp ? JSON.parse('{' + arr.join() + '}',
        function (key, value) {
            return key === "" ? value : decodeURIComponent(value);
        }
    ) : {};

    isValid = qp.state === sentState;

    if ((
        oauth2.auth.schema.get("flow") === "accessCode" ||
        oauth2.auth.schema.get("flow") === "authorizationCode" ||
        oauth2.auth.schema.get("flow") === "authorization_code"
    ) && !oauth2.auth.code) {
        if (!isValid) {
            oauth2.errCb({
                authId: oauth2.auth.name,
                source: "auth",
                level: "warning",
                message: "Authorization may be unsafe, passed state was changed in server. The passed state wasn't returned from auth server."
            });
        }

        if (qp.code) {
            delete oauth2.state;
            oauth2.auth.code = qp.code;
            oauth2.callback({auth: oauth2.auth, redirectUrl: redirectUrl});
        } else {
            let oauthErrorMsg;
            if (qp.error) {
                oauthErrorMsg = "[" + qp.error + "]: " +
                    (qp.error_description ? qp.error_description + ". " : "no accessCode received from the server. ") +
                    (qp.error_uri ? "More info: " + qp.error_uri : "");
            }

            oauth2.errCb({
                authId: oauth2.auth.name,
                source: "auth",
                level: "error",
                message: oauthErrorMsg || "[Authorization failed]: no accessCode received from the server."
            });
        }
    } else {
        oauth2.callback({auth: oauth2.auth, token: qp, isValid: isValid, redirectUrl: redirectUrl});
    }
    window.close();
}

if (document.readyState !== 'loading') {
    run();
} else {
    document.addEventListener('DOMContentLoaded', function () { run(); });
}
</script>
</body>
</html>
"#
}
