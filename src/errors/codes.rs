//! 비즈니스 응답 코드
//!
//! 클라이언트와 합의된 숫자 코드와 언어별 메시지를 정의합니다.
//! 응답 봉투(`{"code", "msg", "data"}`)의 `code` 필드에 그대로 실리며,
//! `msg`는 요청 언어에 맞춰 [`ErrorCode::message`]로 결정됩니다.
//!
//! | 범위 | 의미 |
//! |------|------|
//! | `200..=500` | HTTP 상태와 동일한 기본 코드 |
//! | `2000..=2022` | 공통 비즈니스 오류 |
//! | `2100..=2122` | 회원/인증 흐름 오류 |

use crate::domain::models::lang::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    ParamsError,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,

    UserNotExist,
    UserAlreadyExist,
    PasswordError,
    TokenExpired,
    TokenInvalid,
    LoginRequired,
    ValidCodeExpired,
    VerifyCodeError,
    AccountPasswordError,
    ParseFailed,
    QueryFailed,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    RecordNotFound,
    RecordExists,
    NoPermission,
    InvalidId,
    MissingFields,
    InvalidFormat,
    NoUpdateFields,
    CheckFailed,
    SaveFailed,

    EmailEmpty,
    EmailAlreadyRegistered,
    EmailNotRegistered,
    UsernameAlreadyUsed,
    PasswordStrength,
    PayPasswordFormat,
    InviteCodeEmpty,
    InviteCodeNotExist,
    VerifyCodeInvalid,
    SendCodeFailed,
    RegisterFailed,
    LoginFailed,
    UsernamePasswordEmpty,
    AccountDisabled,
    UsernamePasswordWrong,
    RequiredFieldsEmpty,
    TypeInvalid,
    EmailCodeEmpty,
    PasswordTypeInvalid,
    NewPasswordEmpty,
    ResetPasswordFailed,
    SubmitFailed,
    GetUserInfoFailed,
}

impl ErrorCode {
    /// 응답 봉투에 실리는 숫자 코드
    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::Success => 200,
            ErrorCode::ParamsError => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::ServerError => 500,

            ErrorCode::UserNotExist => 2000,
            ErrorCode::UserAlreadyExist => 2001,
            ErrorCode::PasswordError => 2002,
            ErrorCode::TokenExpired => 2003,
            ErrorCode::TokenInvalid => 2004,
            ErrorCode::LoginRequired => 2005,
            ErrorCode::ValidCodeExpired => 2006,
            ErrorCode::VerifyCodeError => 2007,
            ErrorCode::AccountPasswordError => 2008,
            ErrorCode::ParseFailed => 2009,
            ErrorCode::QueryFailed => 2010,
            ErrorCode::CreateFailed => 2011,
            ErrorCode::UpdateFailed => 2012,
            ErrorCode::DeleteFailed => 2013,
            ErrorCode::RecordNotFound => 2014,
            ErrorCode::RecordExists => 2015,
            ErrorCode::NoPermission => 2016,
            ErrorCode::InvalidId => 2017,
            ErrorCode::MissingFields => 2018,
            ErrorCode::InvalidFormat => 2019,
            ErrorCode::NoUpdateFields => 2020,
            ErrorCode::CheckFailed => 2021,
            ErrorCode::SaveFailed => 2022,

            ErrorCode::EmailEmpty => 2100,
            ErrorCode::EmailAlreadyRegistered => 2101,
            ErrorCode::EmailNotRegistered => 2102,
            ErrorCode::UsernameAlreadyUsed => 2103,
            ErrorCode::PasswordStrength => 2104,
            ErrorCode::PayPasswordFormat => 2105,
            ErrorCode::InviteCodeEmpty => 2106,
            ErrorCode::InviteCodeNotExist => 2107,
            ErrorCode::VerifyCodeInvalid => 2108,
            ErrorCode::SendCodeFailed => 2109,
            ErrorCode::RegisterFailed => 2110,
            ErrorCode::LoginFailed => 2111,
            ErrorCode::UsernamePasswordEmpty => 2112,
            ErrorCode::AccountDisabled => 2113,
            ErrorCode::UsernamePasswordWrong => 2114,
            ErrorCode::RequiredFieldsEmpty => 2115,
            ErrorCode::TypeInvalid => 2116,
            ErrorCode::EmailCodeEmpty => 2117,
            ErrorCode::PasswordTypeInvalid => 2118,
            ErrorCode::NewPasswordEmpty => 2119,
            ErrorCode::ResetPasswordFailed => 2120,
            ErrorCode::SubmitFailed => 2121,
            ErrorCode::GetUserInfoFailed => 2122,
        }
    }

    /// 기본 코드(400/401/403/404/500)는 같은 HTTP 상태로,
    /// 비즈니스 코드는 200으로 전달됩니다.
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::ParamsError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    pub fn message(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Zh => self.message_zh(),
            Lang::En => self.message_en(),
        }
    }

    fn message_zh(&self) -> &'static str {
        match self {
            ErrorCode::Success => "成功",
            ErrorCode::ParamsError => "参数错误",
            ErrorCode::Unauthorized => "未授权",
            ErrorCode::Forbidden => "禁止访问",
            ErrorCode::NotFound => "资源不存在",
            ErrorCode::ServerError => "服务器错误",

            ErrorCode::UserNotExist => "用户不存在",
            ErrorCode::UserAlreadyExist => "用户已存在",
            ErrorCode::PasswordError => "密码错误",
            ErrorCode::TokenExpired => "登录已过期",
            ErrorCode::TokenInvalid => "token无效",
            ErrorCode::LoginRequired => "请先登录",
            ErrorCode::ValidCodeExpired => "验证码已过期",
            ErrorCode::VerifyCodeError => "验证码错误",
            ErrorCode::AccountPasswordError => "账号或密码错误",
            ErrorCode::ParseFailed => "请求解析失败",
            ErrorCode::QueryFailed => "查询失败",
            ErrorCode::CreateFailed => "创建失败",
            ErrorCode::UpdateFailed => "更新失败",
            ErrorCode::DeleteFailed => "删除失败",
            ErrorCode::RecordNotFound => "记录不存在",
            ErrorCode::RecordExists => "记录已存在",
            ErrorCode::NoPermission => "无权限操作",
            ErrorCode::InvalidId => "无效的ID",
            ErrorCode::MissingFields => "缺少必要字段",
            ErrorCode::InvalidFormat => "格式错误",
            ErrorCode::NoUpdateFields => "没有需要更新的字段",
            ErrorCode::CheckFailed => "校验失败",
            ErrorCode::SaveFailed => "保存失败",

            ErrorCode::EmailEmpty => "邮箱不能为空",
            ErrorCode::EmailAlreadyRegistered => "邮箱已注册",
            ErrorCode::EmailNotRegistered => "邮箱未注册",
            ErrorCode::UsernameAlreadyUsed => "用户名已被使用",
            ErrorCode::PasswordStrength => "密码需至少8位且包含大小写字母、数字和特殊字符",
            ErrorCode::PayPasswordFormat => "支付密码必须为6位数字",
            ErrorCode::InviteCodeEmpty => "邀请码不能为空",
            ErrorCode::InviteCodeNotExist => "邀请码不存在",
            ErrorCode::VerifyCodeInvalid => "验证码无效",
            ErrorCode::SendCodeFailed => "验证码发送失败",
            ErrorCode::RegisterFailed => "注册失败",
            ErrorCode::LoginFailed => "登录失败",
            ErrorCode::UsernamePasswordEmpty => "用户名和密码不能为空",
            ErrorCode::AccountDisabled => "账号已被禁用",
            ErrorCode::UsernamePasswordWrong => "用户名或密码错误",
            ErrorCode::RequiredFieldsEmpty => "必填字段不能为空",
            ErrorCode::TypeInvalid => "类型无效",
            ErrorCode::EmailCodeEmpty => "邮箱和验证码不能为空",
            ErrorCode::PasswordTypeInvalid => "密码类型无效",
            ErrorCode::NewPasswordEmpty => "新密码不能为空",
            ErrorCode::ResetPasswordFailed => "重置密码失败",
            ErrorCode::SubmitFailed => "提交失败",
            ErrorCode::GetUserInfoFailed => "获取用户信息失败",
        }
    }

    fn message_en(&self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::ParamsError => "Invalid parameters",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::Forbidden => "Forbidden",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::ServerError => "Server error",

            ErrorCode::UserNotExist => "User does not exist",
            ErrorCode::UserAlreadyExist => "User already exists",
            ErrorCode::PasswordError => "Wrong password",
            ErrorCode::TokenExpired => "Login expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::LoginRequired => "Please log in first",
            ErrorCode::ValidCodeExpired => "Verification code expired",
            ErrorCode::VerifyCodeError => "Wrong verification code",
            ErrorCode::AccountPasswordError => "Wrong account or password",
            ErrorCode::ParseFailed => "Failed to parse request",
            ErrorCode::QueryFailed => "Query failed",
            ErrorCode::CreateFailed => "Create failed",
            ErrorCode::UpdateFailed => "Update failed",
            ErrorCode::DeleteFailed => "Delete failed",
            ErrorCode::RecordNotFound => "Record not found",
            ErrorCode::RecordExists => "Record already exists",
            ErrorCode::NoPermission => "No permission",
            ErrorCode::InvalidId => "Invalid id",
            ErrorCode::MissingFields => "Missing required fields",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::NoUpdateFields => "Nothing to update",
            ErrorCode::CheckFailed => "Check failed",
            ErrorCode::SaveFailed => "Save failed",

            ErrorCode::EmailEmpty => "Email is required",
            ErrorCode::EmailAlreadyRegistered => "Email already registered",
            ErrorCode::EmailNotRegistered => "Email not registered",
            ErrorCode::UsernameAlreadyUsed => "Username already taken",
            ErrorCode::PasswordStrength => {
                "Password needs at least 8 characters with upper and lower case letters, digits and symbols"
            }
            ErrorCode::PayPasswordFormat => "Payment password must be 6 digits",
            ErrorCode::InviteCodeEmpty => "Invite code is required",
            ErrorCode::InviteCodeNotExist => "Invite code does not exist",
            ErrorCode::VerifyCodeInvalid => "Invalid verification code",
            ErrorCode::SendCodeFailed => "Failed to send verification code",
            ErrorCode::RegisterFailed => "Registration failed",
            ErrorCode::LoginFailed => "Login failed",
            ErrorCode::UsernamePasswordEmpty => "Username and password are required",
            ErrorCode::AccountDisabled => "Account disabled",
            ErrorCode::UsernamePasswordWrong => "Wrong username or password",
            ErrorCode::RequiredFieldsEmpty => "Required fields are empty",
            ErrorCode::TypeInvalid => "Invalid type",
            ErrorCode::EmailCodeEmpty => "Email and code are required",
            ErrorCode::PasswordTypeInvalid => "Invalid password type",
            ErrorCode::NewPasswordEmpty => "New password is required",
            ErrorCode::ResetPasswordFailed => "Failed to reset password",
            ErrorCode::SubmitFailed => "Submit failed",
            ErrorCode::GetUserInfoFailed => "Failed to get user info",
        }
    }
}
