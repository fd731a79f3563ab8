//! Landing page: login screen and authenticated group manager shell.
//!
//! The widget decides which `<gigya-screen>` is shown. The API key and
//! domain are passed in by the caller; nothing here reads configuration.

use super::components::{base_html, html_escape};
use super::groups::{EMPTY_HTML, LOADING_HTML};

/// Widget attributes injected into the page.
#[derive(Debug, Clone, Copy)]
pub struct WidgetSettings<'a> {
    pub api_key: &'a str,
    pub domain: &'a str,
}

pub fn render_landing(widget: WidgetSettings<'_>) -> String {
    let body = format!(
        r#"<gigya-js api-key="{api_key}" domain="{domain}" class="h-full w-full">
{login}
{app}
</gigya-js>"#,
        api_key = html_escape(widget.api_key),
        domain = html_escape(widget.domain),
        login = LOGIN_SCREEN,
        app = app_screen(),
    );
    base_html("Engagement Layer", &body)
}

const LOGIN_SCREEN: &str = r##"<gigya-screen slot="not-authenticated" screen-set="landing-login" container-id="login"
  data-on-success-screen="_finish">
  <template>
    <div class="min-h-md flex items-center justify-center fixed inset-0">
      <div class="min-w-md bg-white rounded-xl shadow-lg p-8 space-y-6">
        <div class="text-center space-y-2">
          <h1 class="text-2xl font-semibold text-[#0a6ed1]">SAP Engagement Layer</h1>
          <p class="text-sm text-gray-500">Sign in using one of the options below</p>
        </div>

        <div class="space-y-3">
          <button type="button" data-gigya-provider="oidc-accountssapdev"
            onclick="gigya.socialize.login({provider:'oidc-accountssapdev'})"
            class="w-full flex items-center justify-center gap-3 py-3 rounded-md border border-gray-300 bg-white hover:bg-blue-50 hover:border-[#0a6ed1] transition text-sm font-medium text-gray-700 shadow-sm">
            <iconify-icon icon="simple-icons:sap" width="18"></iconify-icon>
            Sign in with SAP
          </button>

          <button type="button" data-gigya-provider="google"
            onclick="gigya.socialize.login({provider:'google'})"
            class="w-full flex items-center justify-center gap-3 py-3 rounded-md border border-gray-300 bg-white hover:bg-blue-50 hover:border-[#0a6ed1] transition text-sm font-medium text-gray-700 shadow-sm">
            <iconify-icon icon="simple-icons:google" width="18"></iconify-icon>
            Sign in with Google
          </button>
        </div>

        <p class="text-xs text-gray-400 text-center">
          By signing in, you accept the
          <a href="#" class="text-[#0a6ed1] hover:underline">Terms of Service</a>
          and acknowledge our
          <a href="#" class="text-[#0a6ed1] hover:underline">Privacy Policy</a>.
        </p>
      </div>
    </div>
  </template>
</gigya-screen>"##;

fn app_screen() -> String {
    format!(
        r#"<gigya-screen slot="authenticated">
  <template>
    <div class="min-h-screen bg-gray-50">
      <nav class="bg-white shadow-sm border-b">
        <div class="container mx-auto px-4">
          <div class="flex justify-between items-center h-16">
            <div class="flex items-center space-x-2">
              <span class="text-xl font-bold text-gray-900">Gigya</span>
              <span class="text-gray-400">/</span>
              <span class="text-gray-700 font-semibold">Group Manager</span>
            </div>
            <button onclick="gigya.accounts.logout()" class="text-sm text-indigo-600 hover:underline">Logout</button>
          </div>
        </div>
      </nav>

      <main class="container mx-auto px-4 py-8 max-w-4xl">
        <div class="mb-6">
          <h1 class="text-3xl font-bold text-gray-900 mb-1">Group Invitations</h1>
          <p class="text-gray-500">Manage group invitations and members</p>
        </div>

        <div class="card">
          <div class="flex items-center gap-3 mb-4">
            <div class="step-dot">&#128101;</div>
            <div>
              <p class="text-lg font-bold text-gray-900">Groups</p>
              <p class="text-sm text-gray-600">View and manage your groups</p>
            </div>
          </div>

          <div id="groups-list" class="space-y-2">
            <button onclick="loadGroups()" class="btn btn-primary">Load Groups</button>
          </div>
        </div>
      </main>
    </div>

    <script>
    const GROUPS_LOADING = '{loading}';
    const GROUPS_EMPTY = '{empty}';
    {script}
    </script>
  </template>
</gigya-screen>"#,
        loading = LOADING_HTML,
        empty = EMPTY_HTML,
        script = GROUPS_SCRIPT,
    )
}

/// Client half of the render routine. Every path ends in rendered markup.
const GROUPS_SCRIPT: &str = r#"
    function escapeHtml(value) {
        return String(value)
            .replace(/&/g, '&amp;')
            .replace(/</g, '&lt;')
            .replace(/>/g, '&gt;')
            .replace(/"/g, '&quot;')
            .replace(/'/g, '&#39;');
    }

    function renderGroup(group) {
        const name = escapeHtml(group.name || group.groupId);
        const members = group.membersCount || 0;
        const model = escapeHtml(group.model || 'N/A');
        return `
            <div class="border border-gray-200 rounded-lg p-4 hover:border-indigo-300 transition group-block">
              <div class="flex justify-between items-center">
                <div>
                  <h3 class="font-semibold text-gray-900">${name}</h3>
                  <p class="text-sm text-gray-500">Members: ${members}</p>
                  <p class="text-xs text-gray-400 font-mono">Model: ${model}</p>
                </div>
                <span class="tag badge-ok">${members} members</span>
              </div>
            </div>`;
    }

    async function loadGroups() {
        const container = document.getElementById('groups-list');
        container.innerHTML = GROUPS_LOADING;

        try {
            const response = await fetch('/api/groups');
            let data = {};
            try {
                data = await response.json();
            } catch (parseErr) {
                if (response.ok) throw parseErr;
            }

            if (data.error) throw new Error(data.error);
            if (!response.ok) throw new Error('HTTP ' + response.status);

            if (data.results && data.results.length > 0) {
                container.innerHTML = data.results.map(renderGroup).join('');
            } else {
                container.innerHTML = GROUPS_EMPTY;
            }
        } catch (error) {
            const message = error && error.message ? error.message : String(error);
            container.innerHTML = '<p class="text-red-500">Error loading groups: ' + escapeHtml(message) + '</p>';
        }
    }
"#;
